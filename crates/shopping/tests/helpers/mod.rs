#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use recipebox_recipe::{IngredientInput, RecipeInput, RecipeLineInput, Unit};
use recipebox_shared::State;
use recipebox_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebox_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
    })
}

pub async fn register(state: &State, name: &str) -> anyhow::Result<String> {
    Ok(recipebox_user::Command(state.clone())
        .register(RegisterInput {
            email: format!("{name}@recipebox.localhost"),
            username: name.to_owned(),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}

pub async fn ingredient(state: &State, name: &str, unit: Unit) -> anyhow::Result<String> {
    Ok(recipebox_recipe::Command(state.clone())
        .create_ingredient(IngredientInput {
            name: name.to_owned(),
            unit,
        })
        .await?)
}

pub async fn recipe(
    state: &State,
    author_id: &str,
    name: &str,
    lines: &[(&str, u32)],
) -> anyhow::Result<String> {
    Ok(recipebox_recipe::Command(state.clone())
        .create_recipe(
            author_id,
            RecipeInput {
                name: name.to_owned(),
                image: None,
                text: "Cook it.".to_owned(),
                cooking_time: 15,
                tags: vec![],
                ingredients: lines
                    .iter()
                    .map(|(id, amount)| RecipeLineInput {
                        id: id.to_string(),
                        amount: *amount,
                    })
                    .collect(),
            },
        )
        .await?)
}
