use std::collections::HashSet;

use recipebox_db::table::{Favorite, Recipe, RecipeIngredient, RecipeTag, ShoppingCart};
use recipebox_user::Account;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use sqlx::{Sqlite, Transaction};
use validator::Validate;

use crate::repository;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RecipeLineInput {
    pub id: String,
    #[validate(range(min = 1, max = 32000))]
    pub amount: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 30))]
    pub name: String,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1, max = 32000))]
    pub cooking_time: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<RecipeLineInput>,
}

impl super::Command {
    pub async fn create_recipe(
        &self,
        author_id: impl Into<String>,
        input: RecipeInput,
    ) -> recipebox_shared::Result<String> {
        let tags = self.check(&input).await?;
        let author_id = author_id.into();
        let id = recipebox_shared::new_id();

        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::CreatedAt,
            ])
            .values_panic([
                id.to_owned().into(),
                author_id.to_owned().into(),
                input.name.into(),
                input.image.into(),
                input.text.into(),
                input.cooking_time.into(),
                recipebox_shared::now().into(),
            ])
            .to_owned();

        let mut tx = self.write_db.begin().await?;
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        insert_children(&mut tx, &id, &input.ingredients, &tags).await?;
        tx.commit().await?;

        tracing::info!(recipe.id = %id, author.id = %author_id, "recipe created");

        Ok(id)
    }

    /// Replaces every field, line and tag of the recipe.
    pub async fn update_recipe(
        &self,
        actor: &Account,
        id: impl Into<String>,
        input: RecipeInput,
    ) -> recipebox_shared::Result<()> {
        let id = id.into();
        self.check_owner(actor, &id).await?;
        let tags = self.check(&input).await?;

        let statement = Query::update()
            .table(Recipe::Table)
            .value(Recipe::Name, input.name)
            .value(Recipe::Image, input.image)
            .value(Recipe::Text, input.text)
            .value(Recipe::CookingTime, input.cooking_time)
            .and_where(Expr::col(Recipe::Id).eq(id.as_str()))
            .to_owned();

        let mut tx = self.write_db.begin().await?;
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        delete_children(&mut tx, &id, false).await?;
        insert_children(&mut tx, &id, &input.ingredients, &tags).await?;
        tx.commit().await?;

        tracing::info!(recipe.id = %id, "recipe updated");

        Ok(())
    }

    pub async fn delete_recipe(
        &self,
        actor: &Account,
        id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let id = id.into();
        self.check_owner(actor, &id).await?;

        let mut tx = self.write_db.begin().await?;
        delete_children(&mut tx, &id, true).await?;

        let (sql, values) = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id.as_str()))
            .build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        tx.commit().await?;

        tracing::info!(recipe.id = %id, "recipe deleted");

        Ok(())
    }

    async fn check_owner(&self, actor: &Account, id: &str) -> recipebox_shared::Result<()> {
        let Some(author_id) = repository::find_author(&self.read_db, id).await? else {
            return Err(recipebox_shared::Error::not_found("recipe"));
        };

        if author_id != actor.id && !actor.is_admin {
            return Err(recipebox_shared::Error::Forbidden);
        }

        Ok(())
    }

    /// Validates the input and returns its tag ids without duplicates.
    async fn check(&self, input: &RecipeInput) -> recipebox_shared::Result<Vec<String>> {
        input.validate()?;

        let mut seen = HashSet::new();
        let mut ingredient_ids = Vec::with_capacity(input.ingredients.len());
        for line in &input.ingredients {
            if !seen.insert(line.id.as_str()) {
                recipebox_shared::bail!("Ingredient {} is listed more than once", line.id);
            }
            ingredient_ids.push(line.id.to_owned());
        }

        if repository::count_ingredients(&self.read_db, &ingredient_ids).await?
            != ingredient_ids.len() as u64
        {
            recipebox_shared::bail!("Unknown ingredient");
        }

        let mut seen = HashSet::new();
        let tags: Vec<String> = input
            .tags
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        if repository::count_tags(&self.read_db, &tags).await? != tags.len() as u64 {
            recipebox_shared::bail!("Unknown tag");
        }

        Ok(tags)
    }
}

async fn insert_children(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: &str,
    lines: &[RecipeLineInput],
    tags: &[String],
) -> recipebox_shared::Result<()> {
    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::Id,
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
            RecipeIngredient::Position,
        ])
        .to_owned();

    for (position, line) in lines.iter().enumerate() {
        statement.values_panic([
            recipebox_shared::new_id().into(),
            recipe_id.into(),
            line.id.as_str().into(),
            line.amount.into(),
            (position as u32).into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut **tx).await?;

    if tags.is_empty() {
        return Ok(());
    }

    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::Id, RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();

    for tag_id in tags {
        statement.values_panic([
            recipebox_shared::new_id().into(),
            recipe_id.into(),
            tag_id.as_str().into(),
        ]);
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut **tx).await?;

    Ok(())
}

/// Removes lines and tags, plus favorites and cart entries when `all`.
async fn delete_children(
    tx: &mut Transaction<'_, Sqlite>,
    recipe_id: &str,
    all: bool,
) -> recipebox_shared::Result<()> {
    let mut statements = vec![
        Query::delete()
            .from_table(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
            .to_owned(),
        Query::delete()
            .from_table(RecipeTag::Table)
            .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
            .to_owned(),
    ];

    if all {
        statements.push(
            Query::delete()
                .from_table(Favorite::Table)
                .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
                .to_owned(),
        );
        statements.push(
            Query::delete()
                .from_table(ShoppingCart::Table)
                .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
                .to_owned(),
        );
    }

    for statement in statements {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut **tx).await?;
    }

    Ok(())
}
