use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use recipebox_shared::State;
use recipebox_shopping::{DocumentRenderer, PdfRenderer, SqliteCartRepository};
use sqlx::SqlitePool;

mod catalog;
mod health;
mod recipes;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: recipebox_user::Command,
    pub user_query: recipebox_user::Query,
    pub recipe_command: recipebox_recipe::Command,
    pub recipe_query: recipebox_recipe::Query,
    pub shopping_command: recipebox_shopping::Command,
    pub cart_repository: SqliteCartRepository,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(
        config: crate::config::Config,
        read_db: SqlitePool,
        write_db: SqlitePool,
    ) -> anyhow::Result<Self> {
        let mut renderer = PdfRenderer::new(config.shopping.font_size);
        match &config.shopping.font_path {
            Some(path) => renderer = renderer.with_font_file(path)?,
            None => tracing::warn!(
                "shopping.font_path is unset, shopping lists fall back to Helvetica and cannot render non-Latin names"
            ),
        }

        let state = State {
            read_db: read_db.clone(),
            write_db,
        };

        Ok(Self {
            config,
            user_command: recipebox_user::Command(state.clone()),
            user_query: recipebox_user::Query(read_db.clone()),
            recipe_command: recipebox_recipe::Command(state.clone()),
            recipe_query: recipebox_recipe::Query(read_db.clone()),
            shopping_command: recipebox_shopping::Command(state),
            cart_repository: SqliteCartRepository(read_db.clone()),
            renderer: Arc::new(renderer),
            pool: read_db,
        })
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/auth/token/login", post(users::login))
        .route("/api/auth/token/logout", post(users::logout))
        .route("/api/users", post(users::register))
        .route("/api/users/me", get(users::me))
        .route("/api/users/subscriptions", get(users::subscriptions))
        .route("/api/users/{id}", get(users::profile))
        .route(
            "/api/users/{id}/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .route("/api/tags", get(catalog::tags))
        .route("/api/tags/{id}", get(catalog::tag))
        .route("/api/ingredients", get(catalog::ingredients))
        .route("/api/ingredients/{id}", get(catalog::ingredient))
        .route(
            "/api/recipes",
            get(recipes::list).post(recipes::create),
        )
        .route(
            "/api/recipes/download_shopping_cart",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/api/recipes/{id}/favorite",
            post(recipes::favorite).delete(recipes::unfavorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .with_state(app_state)
}
