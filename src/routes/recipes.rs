use axum::{
    Json,
    extract::{Path, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};
use axum_extra::extract::Query;
use recipebox_recipe::{RecipeFilter, RecipeInput};
use recipebox_shared::PageArgs;
use recipebox_shopping::{
    DocumentRenderer, PDF_CONTENT_TYPE, ShoppingListAggregator, buying_list_filename,
};
use serde::Deserialize;

use crate::{
    auth::{AuthUser, Viewer},
    error::AppError,
    routes::AppState,
};

#[derive(Deserialize)]
pub struct RecipeParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true"))
}

pub async fn list(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(params): Query<RecipeParams>,
) -> Result<impl IntoResponse, AppError> {
    let filter = RecipeFilter {
        author: params.author,
        tags: params.tags,
        is_favorited: flag(params.is_favorited.as_deref()),
        is_in_shopping_cart: flag(params.is_in_shopping_cart.as_deref()),
    };
    let args = PageArgs {
        page: params.page,
        limit: params.limit,
    };

    Ok(Json(
        state
            .recipe_query
            .filter_recipes(filter, args, viewer.id())
            .await?,
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let recipe = state
        .recipe_query
        .find_recipe(id, viewer.id())
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("recipe"))?;

    Ok(Json(recipe))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .recipe_command
        .create_recipe(&account.id, input)
        .await?;

    let recipe = state
        .recipe_query
        .find_recipe(id, Some(account.id.as_str()))
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("recipe"))?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .update_recipe(&account, &id, input)
        .await?;

    let recipe = state
        .recipe_query
        .find_recipe(id, Some(account.id.as_str()))
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("recipe"))?;

    Ok(Json(recipe))
}

pub async fn delete(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.recipe_command.delete_recipe(&account, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn favorite(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.recipe_command.add_favorite(&account.id, &id).await?;

    Ok((StatusCode::CREATED, Json(short_recipe(&state, id).await?)))
}

pub async fn unfavorite(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.recipe_command.remove_favorite(&account.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.shopping_command.add_to_cart(&account.id, &id).await?;

    Ok((StatusCode::CREATED, Json(short_recipe(&state, id).await?)))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .shopping_command
        .remove_from_cart(&account.id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Renders the caller's aggregated cart as a PDF attachment.
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(account): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let aggregator = ShoppingListAggregator::new(
        state.cart_repository.clone(),
        state.config.shopping.grouping,
    );
    let lines = aggregator.aggregate(&account.id).await?;
    let count = lines.len();
    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&lines))
        .await
        .map_err(anyhow::Error::from)??;
    let filename = buying_list_filename(&chrono::Local::now());

    tracing::info!(user.id = %account.id, lines = count, "shopping list downloaded");

    Ok((
        [
            (CONTENT_TYPE, PDF_CONTENT_TYPE.to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf,
    ))
}

/// `{id, name, image, cooking_time}` of a recipe, as returned by
/// favorite and cart additions.
async fn short_recipe(state: &AppState, id: String) -> Result<serde_json::Value, AppError> {
    let recipe = state
        .recipe_query
        .find_recipe(id, None)
        .await?
        .ok_or_else(|| recipebox_shared::Error::not_found("recipe"))?;

    Ok(serde_json::json!({
        "id": recipe.id,
        "name": recipe.name,
        "image": recipe.image,
        "cooking_time": recipe.cooking_time,
    }))
}

#[cfg(test)]
mod tests {
    use super::flag;

    #[test]
    fn test_query_flags() {
        assert!(flag(Some("1")));
        assert!(flag(Some("true")));
        assert!(!flag(Some("0")));
        assert!(!flag(None));
    }
}
