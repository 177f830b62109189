#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use recipebox::config::{
    Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig, ShoppingConfig,
};
use recipebox_recipe::{IngredientInput, Unit};
use recipebox_shared::State;
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: State,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub fn test_config(url: String) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 1,
        },
        observability: ObservabilityConfig::default(),
        shopping: ShoppingConfig::default(),
    }
}

pub async fn setup_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.child("recipebox.db").display());
    let config = test_config(url.to_owned());

    recipebox::migrate::migrate(&config).await?;

    let pool = recipebox::db::create_pool(&url, 1).await?;
    let app_state = recipebox::AppState::new(config, pool.clone(), pool.clone())?;

    Ok(TestApp {
        router: recipebox::router(app_state),
        state: State {
            read_db: pool.clone(),
            write_db: pool,
        },
        _dir: dir,
    })
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Registers `name` and returns its auth token.
    pub async fn login(&self, name: &str) -> String {
        let email = format!("{name}@recipebox.localhost");

        let response = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(json!({
                    "email": email,
                    "username": name,
                    "first_name": "First",
                    "last_name": "Last",
                    "password": "my_password",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        let response = self
            .send(
                Method::POST,
                "/api/auth/token/login",
                None,
                Some(json!({ "email": email, "password": "my_password" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        response.json()["auth_token"].as_str().unwrap().to_owned()
    }

    pub async fn ingredient(&self, name: &str, unit: Unit) -> String {
        recipebox_recipe::Command(self.state.clone())
            .create_ingredient(IngredientInput {
                name: name.to_owned(),
                unit,
            })
            .await
            .unwrap()
    }

    /// Creates a recipe through the API and returns its id.
    pub async fn recipe(&self, token: &str, name: &str, lines: &[(&str, u32)]) -> String {
        let ingredients: Vec<Value> = lines
            .iter()
            .map(|(id, amount)| json!({ "id": id, "amount": amount }))
            .collect();

        let response = self
            .send(
                Method::POST,
                "/api/recipes",
                Some(token),
                Some(json!({
                    "name": name,
                    "text": "Mix everything.",
                    "cooking_time": 10,
                    "ingredients": ingredients,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

        response.json()["id"].as_str().unwrap().to_owned()
    }
}
