use recipebox_db::table::{Follow, Recipe, User};
use recipebox_shared::{Page, PageArgs};
use sea_query::{Expr, ExprTrait, Func, Order, Query as Select, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::repository::{self, FindType};

#[derive(Clone)]
pub struct Query(pub SqlitePool);

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ShortRecipe {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
    pub cooking_time: i64,
}

#[derive(Debug, Serialize)]
pub struct Subscription {
    #[serde(flatten)]
    pub author: Profile,
    pub recipes: Vec<ShortRecipe>,
    pub recipes_count: u64,
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    email: String,
    username: String,
    first_name: String,
    last_name: String,
}

/// Identity of an authenticated caller, as stored.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub is_admin: bool,
}

impl Query {
    pub async fn find_account(
        &self,
        id: impl Into<String>,
    ) -> recipebox_shared::Result<Option<Account>> {
        Ok(repository::find(&self.0, FindType::Id(id.into()))
            .await?
            .map(|row| Account {
                is_admin: row.is_admin(),
                id: row.id,
            }))
    }

    /// Profile of `id` as seen by `viewer_id` (anonymous when `None`).
    pub async fn find_profile(
        &self,
        id: impl Into<String>,
        viewer_id: Option<&str>,
    ) -> recipebox_shared::Result<Option<Profile>> {
        let Some(row) = repository::find(&self.0, FindType::Id(id.into())).await? else {
            return Ok(None);
        };

        let is_subscribed = match viewer_id {
            Some(viewer_id) => repository::is_following(&self.0, viewer_id, &row.id).await?,
            None => false,
        };

        Ok(Some(Profile {
            id: row.id,
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            is_subscribed,
        }))
    }

    /// Authors followed by `user_id`, most recent subscription first.
    pub async fn subscriptions(
        &self,
        user_id: impl Into<String>,
        args: PageArgs,
        recipes_limit: Option<u64>,
    ) -> recipebox_shared::Result<Page<Subscription>> {
        let user_id = user_id.into();

        let (sql, values) = Select::select()
            .expr(Func::count(Expr::col(Follow::Id)))
            .from(Follow::Table)
            .and_where(Expr::col(Follow::UserId).eq(user_id.as_str()))
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        let (sql, values) = Select::select()
            .columns([
                (User::Table, User::Id),
                (User::Table, User::Email),
                (User::Table, User::Username),
                (User::Table, User::FirstName),
                (User::Table, User::LastName),
            ])
            .from(User::Table)
            .inner_join(
                Follow::Table,
                Expr::col((Follow::Table, Follow::AuthorId)).equals((User::Table, User::Id)),
            )
            .and_where(Expr::col((Follow::Table, Follow::UserId)).eq(user_id.as_str()))
            .order_by((Follow::Table, Follow::CreatedAt), Order::Desc)
            .order_by_expr(Expr::cust("\"follow\".\"rowid\""), Order::Desc)
            .limit(args.limit())
            .offset(args.offset())
            .build_sqlx(SqliteQueryBuilder);

        let authors = sqlx::query_as_with::<_, AuthorRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let mut results = Vec::with_capacity(authors.len());
        for author in authors {
            let (recipes, recipes_count) = self.author_recipes(&author.id, recipes_limit).await?;
            results.push(Subscription {
                author: Profile {
                    id: author.id,
                    email: author.email,
                    username: author.username,
                    first_name: author.first_name,
                    last_name: author.last_name,
                    is_subscribed: true,
                },
                recipes,
                recipes_count,
            });
        }

        Ok(Page {
            count: count.try_into().unwrap_or(0),
            results,
        })
    }

    async fn author_recipes(
        &self,
        author_id: &str,
        limit: Option<u64>,
    ) -> recipebox_shared::Result<(Vec<ShortRecipe>, u64)> {
        let (sql, values) = Select::select()
            .expr(Func::count(Expr::col(Recipe::Id)))
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        let mut statement = Select::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::AuthorId).eq(author_id))
            .order_by(Recipe::CreatedAt, Order::Desc)
            .to_owned();

        if let Some(limit) = limit {
            statement.limit(limit);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipes = sqlx::query_as_with::<_, ShortRecipe, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok((recipes, count.try_into().unwrap_or(0)))
    }
}
