use std::ops::Deref;

use recipebox_shared::State;

mod catalog;
mod favorite;
mod recipe;

pub use catalog::{IngredientInput, TagInput};
pub use recipe::{RecipeInput, RecipeLineInput};

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
