#![allow(dead_code)]

use std::{path::PathBuf, str::FromStr};

use recipebox_recipe::{IngredientInput, RecipeInput, RecipeLineInput, TagInput, Unit};
use recipebox_shared::State;
use recipebox_user::{Account, RegisterInput};
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

pub async fn register(state: &State, name: &str) -> anyhow::Result<Account> {
    let id = recipebox_user::Command(state.clone())
        .register(RegisterInput {
            email: format!("{name}@recipebox.localhost"),
            username: name.to_owned(),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(Account {
        id,
        is_admin: false,
    })
}

pub async fn ingredient(
    cmd: &recipebox_recipe::Command,
    name: &str,
    unit: Unit,
) -> anyhow::Result<String> {
    Ok(cmd
        .create_ingredient(IngredientInput {
            name: name.to_owned(),
            unit,
        })
        .await?)
}

pub async fn tag(cmd: &recipebox_recipe::Command, slug: &str) -> anyhow::Result<String> {
    Ok(cmd
        .create_tag(TagInput {
            name: slug.to_owned(),
            color: "#49B64E".to_owned(),
            slug: slug.to_owned(),
        })
        .await?)
}

pub fn recipe_input(name: &str, lines: &[(&str, u32)], tags: &[&str]) -> RecipeInput {
    RecipeInput {
        name: name.to_owned(),
        image: None,
        text: "Mix everything.".to_owned(),
        cooking_time: 10,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ingredients: lines
            .iter()
            .map(|(id, amount)| RecipeLineInput {
                id: id.to_string(),
                amount: *amount,
            })
            .collect(),
    }
}
