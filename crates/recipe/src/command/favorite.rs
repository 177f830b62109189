use recipebox_db::table::Favorite;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository;

impl super::Command {
    pub async fn add_favorite(
        &self,
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let user_id = user_id.into();
        let recipe_id = recipe_id.into();

        if !repository::exists(&self.read_db, &recipe_id).await? {
            return Err(recipebox_shared::Error::not_found("recipe"));
        }

        if repository::is_favorite(&self.read_db, &user_id, &recipe_id).await? {
            recipebox_shared::bail!("Recipe is already in favorites");
        }

        let statement = Query::insert()
            .into_table(Favorite::Table)
            .columns([
                Favorite::Id,
                Favorite::UserId,
                Favorite::RecipeId,
                Favorite::AddedAt,
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

    pub async fn remove_favorite(
        &self,
        user_id: impl Into<String>,
        recipe_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let recipe_id = recipe_id.into();

        if !repository::exists(&self.read_db, &recipe_id).await? {
            return Err(recipebox_shared::Error::not_found("recipe"));
        }

        let statement = Query::delete()
            .from_table(Favorite::Table)
            .and_where(Expr::col(Favorite::UserId).eq(user_id.into()))
            .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            recipebox_shared::bail!("Recipe is not in favorites");
        }

        Ok(())
    }
}
