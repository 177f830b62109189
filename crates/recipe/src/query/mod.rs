use sqlx::SqlitePool;

mod catalog;
mod recipe;

pub use catalog::{IngredientView, TagView};
pub use recipe::{RecipeFilter, RecipeIngredientView, RecipeView};

#[derive(Clone)]
pub struct Query(pub SqlitePool);
