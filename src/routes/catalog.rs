use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{error::AppError, routes::AppState};

pub async fn tags(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.recipe_query.list_tags().await?))
}

pub async fn tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tag = state
        .recipe_query
        .find_tag(id)
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("tag"))?;

    Ok(Json(tag))
}

#[derive(Deserialize)]
pub struct IngredientParams {
    pub name: Option<String>,
}

pub async fn ingredients(
    State(state): State<AppState>,
    Query(params): Query<IngredientParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(
        state
            .recipe_query
            .list_ingredients(params.name.as_deref())
            .await?,
    ))
}

pub async fn ingredient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ingredient = state
        .recipe_query
        .find_ingredient(id)
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("ingredient"))?;

    Ok(Json(ingredient))
}
