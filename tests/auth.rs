use axum::http::{Method, StatusCode};
use serde_json::json;

mod helpers;

#[tokio::test]
async fn test_register_login_and_me() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let token = app.login("john").await;

    let response = app.send(Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(response.status, StatusCode::OK);

    let me = response.json();
    assert_eq!(me["username"], "john");
    assert_eq!(me["email"], "john@recipebox.localhost");
    assert_eq!(me["is_subscribed"], false);
    assert!(me.get("password").is_none());

    Ok(())
}

#[tokio::test]
async fn test_me_requires_token() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;

    let response = app.send(Method::GET, "/api/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .send(Method::GET, "/api/users/me", Some("not-a-token"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_login_with_wrong_password() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    app.login("john").await;

    let response = app
        .send(
            Method::POST,
            "/api/auth/token/login",
            None,
            Some(json!({ "email": "john@recipebox.localhost", "password": "wrong_password" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_register_duplicate_email() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    app.login("john").await;

    let response = app
        .send(
            Method::POST,
            "/api/users",
            None,
            Some(json!({
                "email": "john@recipebox.localhost",
                "username": "johnny",
                "password": "my_password",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_subscribe_and_list_subscriptions() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let john = app.login("john").await;
    let albert = app.login("albert").await;
    let flour = app.ingredient("Flour", recipebox_recipe::Unit::Gram).await;
    app.recipe(&albert, "Bread", &[(flour.as_str(), 500)]).await;

    let albert_id = app
        .send(Method::GET, "/api/users/me", Some(&albert), None)
        .await
        .json()["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let uri = format!("/api/users/{albert_id}/subscribe");
    let response = app.send(Method::POST, &uri, Some(&john), None).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.json()["is_subscribed"], true);

    let response = app.send(Method::POST, &uri, Some(&john), None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .send(Method::GET, "/api/users/subscriptions", Some(&john), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let page = response.json();
    assert_eq!(page["count"], 1);
    assert_eq!(page["results"][0]["recipes_count"], 1);
    assert_eq!(page["results"][0]["recipes"][0]["name"], "Bread");

    let response = app.send(Method::DELETE, &uri, Some(&john), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    Ok(())
}

#[tokio::test]
async fn test_logout() -> anyhow::Result<()> {
    let app = helpers::setup_test_app().await?;
    let token = app.login("john").await;

    let response = app
        .send(Method::POST, "/api/auth/token/logout", Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .send(Method::POST, "/api/auth/token/logout", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    Ok(())
}
