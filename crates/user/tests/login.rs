use recipebox_user::{Command, LoginInput, Role, validate_token};
use temp_dir::TempDir;

mod helpers;

const SECRET: &str = "test_secret_key_minimum_32_characters_long";

#[tokio::test]
async fn test_login() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state);

    let id = helpers::register(&cmd, "john").await?;

    let token = cmd
        .login(
            LoginInput {
                email: "john@recipebox.localhost".to_owned(),
                password: "my_password".to_owned(),
            },
            SECRET,
            3600,
        )
        .await?;

    let claims = validate_token(&token, SECRET)?;
    assert_eq!(claims.sub, id);
    assert!(!claims.is_admin);

    Ok(())
}

#[tokio::test]
async fn test_login_invalid_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state);

    helpers::register(&cmd, "john").await?;

    let err = cmd
        .login(
            LoginInput {
                email: "john@recipebox.localhost".to_owned(),
                password: "wrong_password".to_owned(),
            },
            SECRET,
            3600,
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to log in with provided credentials."
    );

    let err = cmd
        .login(
            LoginInput {
                email: "nobody@recipebox.localhost".to_owned(),
                password: "my_password".to_owned(),
            },
            SECRET,
            3600,
        )
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unable to log in with provided credentials."
    );

    Ok(())
}

#[tokio::test]
async fn test_admin_token() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("db.sqlite3");
    let state = helpers::setup_test_state(path).await?;
    let cmd = Command(state);

    helpers::register(&cmd, "john").await?;
    cmd.set_role_by_email("john@recipebox.localhost", Role::Admin)
        .await?;

    let token = cmd
        .login(
            LoginInput {
                email: "john@recipebox.localhost".to_owned(),
                password: "my_password".to_owned(),
            },
            SECRET,
            3600,
        )
        .await?;

    assert!(validate_token(&token, SECRET)?.is_admin);

    let err = cmd
        .set_role_by_email("nobody@recipebox.localhost", Role::Admin)
        .await
        .unwrap_err();
    assert!(matches!(err, recipebox_shared::Error::NotFound(_)));

    Ok(())
}
