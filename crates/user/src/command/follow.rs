use recipebox_db::table::Follow;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::{self, FindType};

impl super::Command {
    pub async fn subscribe(
        &self,
        user_id: impl Into<String>,
        author_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let user_id = user_id.into();
        let author_id = author_id.into();

        if user_id == author_id {
            recipebox_shared::bail!("You cannot subscribe to yourself");
        }

        if repository::find(&self.read_db, FindType::Id(author_id.to_owned()))
            .await?
            .is_none()
        {
            return Err(recipebox_shared::Error::not_found("user"));
        }

        if repository::is_following(&self.read_db, &user_id, &author_id).await? {
            recipebox_shared::bail!("You are already subscribed to this author");
        }

        let statement = Query::insert()
            .into_table(Follow::Table)
            .columns([
                Follow::Id,
                Follow::UserId,
                Follow::AuthorId,
                Follow::CreatedAt,
            ])
            .values_panic([
                recipebox_shared::new_id().into(),
                user_id.into(),
                author_id.into(),
                recipebox_shared::now().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        Ok(())
    }

    pub async fn unsubscribe(
        &self,
        user_id: impl Into<String>,
        author_id: impl Into<String>,
    ) -> recipebox_shared::Result<()> {
        let statement = Query::delete()
            .from_table(Follow::Table)
            .and_where(Expr::col(Follow::UserId).eq(user_id.into()))
            .and_where(Expr::col(Follow::AuthorId).eq(author_id.into()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(recipebox_shared::Error::not_found("subscription"));
        }

        Ok(())
    }
}
