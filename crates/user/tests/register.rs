use recipebox_user::{Command, Query, RegisterInput};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_register() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state.clone());
    let query = Query(state.read_db.clone());

    let id = helpers::register(&cmd, "john").await?;
    let profile = query.find_profile(&id, None).await?.unwrap();

    assert_eq!(profile.username, "john");
    assert_eq!(profile.email, "john@recipebox.localhost");
    assert!(!profile.is_subscribed);

    let account = query.find_account(&id).await?.unwrap();
    assert!(!account.is_admin);

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state);

    helpers::register(&cmd, "john").await?;

    let err = cmd
        .register(RegisterInput {
            email: "john@recipebox.localhost".to_owned(),
            username: "johnny".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            password: "my_password".to_owned(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");

    let err = helpers::register(&cmd, "john").await.unwrap_err();
    assert!(err.to_string().contains("already exists"));

    Ok(())
}

#[tokio::test]
async fn test_register_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state);

    let err = cmd
        .register(RegisterInput {
            email: "not-an-email".to_owned(),
            username: "john".to_owned(),
            first_name: String::new(),
            last_name: String::new(),
            password: "short".to_owned(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, recipebox_shared::Error::Validate(_)));

    Ok(())
}
