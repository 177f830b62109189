use recipebox_db::table::{Favorite, Ingredient, Recipe, ShoppingCart, Tag};
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqlitePool;

/// Author of the recipe, `None` when the recipe does not exist.
pub async fn find_author(
    pool: &SqlitePool,
    id: impl Into<String>,
) -> recipebox_shared::Result<Option<String>> {
    let statement = Query::select()
        .column(Recipe::AuthorId)
        .from(Recipe::Table)
        .and_where(Expr::col(Recipe::Id).eq(id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(author_id,)| author_id))
}

pub async fn exists(pool: &SqlitePool, id: impl Into<String>) -> recipebox_shared::Result<bool> {
    Ok(find_author(pool, id).await?.is_some())
}

pub async fn is_favorite(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    recipe_id: impl Into<String>,
) -> recipebox_shared::Result<bool> {
    let statement = Query::select()
        .column(Favorite::Id)
        .from(Favorite::Table)
        .and_where(Expr::col(Favorite::UserId).eq(user_id.into()))
        .and_where(Expr::col(Favorite::RecipeId).eq(recipe_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Number of distinct ids among `ids` that exist as ingredients.
pub async fn count_ingredients(pool: &SqlitePool, ids: &[String]) -> recipebox_shared::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let statement = Query::select()
        .expr(Func::count(Expr::col(Ingredient::Id)))
        .from(Ingredient::Table)
        .and_where(Expr::col(Ingredient::Id).is_in(ids.iter().map(String::as_str)))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count.try_into().unwrap_or(0))
}

/// Number of distinct ids among `ids` that exist as tags.
pub async fn count_tags(pool: &SqlitePool, ids: &[String]) -> recipebox_shared::Result<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let statement = Query::select()
        .expr(Func::count(Expr::col(Tag::Id)))
        .from(Tag::Table)
        .and_where(Expr::col(Tag::Id).is_in(ids.iter().map(String::as_str)))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_one(pool)
        .await?;

    Ok(count.try_into().unwrap_or(0))
}

pub async fn is_in_cart(
    pool: &SqlitePool,
    user_id: impl Into<String>,
    recipe_id: impl Into<String>,
) -> recipebox_shared::Result<bool> {
    let statement = Query::select()
        .column(ShoppingCart::Id)
        .from(ShoppingCart::Table)
        .and_where(Expr::col(ShoppingCart::UserId).eq(user_id.into()))
        .and_where(Expr::col(ShoppingCart::RecipeId).eq(recipe_id.into()))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
