use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use recipebox_shared::PageArgs;
use recipebox_user::{LoginInput, RegisterInput};
use serde::Deserialize;
use serde_json::json;

use crate::{
    auth::{AuthUser, Viewer},
    error::AppError,
    routes::AppState,
};

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegisterForm>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .user_command
        .register(RegisterInput {
            email: form.email,
            username: form.username,
            first_name: form.first_name,
            last_name: form.last_name,
            password: form.password,
        })
        .await?;

    let profile = state
        .user_query
        .find_profile(&id, None)
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("user"))?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<impl IntoResponse, AppError> {
    let lifetime = u64::try_from(state.config.jwt.expiration_days)
        .unwrap_or(0)
        .saturating_mul(24 * 60 * 60);

    let token = state
        .user_command
        .login(
            LoginInput {
                email: form.email,
                password: form.password,
            },
            &state.config.jwt.secret,
            lifetime,
        )
        .await?;

    Ok(Json(json!({ "auth_token": token })))
}

/// Tokens are stateless, logging out only requires a valid one.
pub async fn logout(AuthUser(_): AuthUser) -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .user_query
        .find_profile(&account.id, Some(account.id.as_str()))
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(profile))
}

pub async fn profile(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let profile = state
        .user_query
        .find_profile(id, viewer.id())
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("user"))?;

    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct SubscriptionParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub recipes_limit: Option<u64>,
}

pub async fn subscriptions(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Query(params): Query<SubscriptionParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = state
        .user_query
        .subscriptions(
            &account.id,
            PageArgs {
                page: params.page,
                limit: params.limit,
            },
            params.recipes_limit,
        )
        .await?;

    Ok(Json(page))
}

pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_command.subscribe(&account.id, &id).await?;

    let subscription = state
        .user_query
        .find_profile(&id, Some(account.id.as_str()))
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("user"))?;

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.user_command.unsubscribe(&account.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
