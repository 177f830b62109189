use std::ops::Deref;

use recipebox_db::table::ShoppingCart;
use recipebox_recipe::repository;
use recipebox_shared::State;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Command {
    pub async fn add_to_cart(
        &self,
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let user_id = user_id.into();
        let recipe_id = recipe_id.into();

        if !repository::exists(&self.read_db, &recipe_id).await? {
            return Err(recipebox_shared::Error::not_found("recipe"));
        }

        if repository::is_in_cart(&self.read_db, &user_id, &recipe_id).await? {
            recipebox_shared::bail!("Recipe is already in the shopping cart");
        }

        let statement = Query::insert()
            .into_table(ShoppingCart::Table)
            .columns([
                ShoppingCart::Id,
                ShoppingCart::UserId,
                ShoppingCart::RecipeId,
                ShoppingCart::AddedAt,
            ])
            .values_panic([
                recipebox_shared::new_id().into(),
                user_id.into(),
                recipe_id.into(),
                recipebox_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    pub async fn remove_from_cart(
        &self,
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let recipe_id = recipe_id.into();

        if !repository::exists(&self.read_db, &recipe_id).await? {
            return Err(recipebox_shared::Error::not_found("recipe"));
        }

        let statement = Query::delete()
            .from_table(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id.into()))
            .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            recipebox_shared::bail!("Recipe is not in the shopping cart");
        }

        Ok(())
    }
}
