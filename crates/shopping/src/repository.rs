use async_trait::async_trait;
use recipebox_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use recipebox_recipe::Unit;
use sea_query::{Expr, ExprTrait, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow, types::Text};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct CartEntry {
    pub recipe_id: String,
    pub added_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct IngredientLine {
    pub ingredient_id: String,
    pub amount: Option<u32>,
    pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRecord {
    pub id: String,
    pub name: String,
    pub unit: Unit,
}

/// Read access to everything a shopping list is built from.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Cart entries of the user, oldest first.
    async fn cart_entries(&self, user_id: &str) -> recipebox_shared::Result<Vec<CartEntry>>;

    /// Lines of the recipe in authored order, `None` when the recipe is gone.
    async fn recipe_lines(
        &self,
        recipe_id: &str,
    ) -> recipebox_shared::Result<Option<Vec<IngredientLine>>>;

    async fn find_ingredient(&self, id: &str)
    -> recipebox_shared::Result<Option<IngredientRecord>>;
}

#[derive(Clone)]
pub struct SqliteCartRepository(pub SqlitePool);

#[derive(FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    measurement_unit: Text<Unit>,
}

#[async_trait]
impl CartRepository for SqliteCartRepository {
    async fn cart_entries(&self, user_id: &str) -> recipebox_shared::Result<Vec<CartEntry>> {
        let (sql, values) = Query::select()
            .columns([ShoppingCart::RecipeId, ShoppingCart::AddedAt])
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .order_by(ShoppingCart::AddedAt, Order::Asc)
            .order_by_expr(Expr::cust("\"shopping_cart\".\"rowid\""), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, CartEntry, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    async fn recipe_lines(
        &self,
        recipe_id: &str,
    ) -> recipebox_shared::Result<Option<Vec<IngredientLine>>> {
        if !recipebox_recipe::repository::exists(&self.0, recipe_id).await? {
            return Ok(None);
        }

        let (sql, values) = Query::select()
            .columns([
                RecipeIngredient::IngredientId,
                RecipeIngredient::Amount,
                RecipeIngredient::Position,
            ])
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
            .order_by(RecipeIngredient::Position, Order::Asc)
            .order_by_expr(Expr::cust("\"recipe_ingredient\".\"rowid\""), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(Some(
            sqlx::query_as_with::<_, IngredientLine, _>(&sql, values)
                .fetch_all(&self.0)
                .await?,
        ))
    }

    async fn find_ingredient(
        &self,
        id: &str,
    ) -> recipebox_shared::Result<Option<IngredientRecord>> {
        let (sql, values) = Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(|row| IngredientRecord {
            id: row.id,
            name: row.name,
            unit: row.measurement_unit.0,
        }))
    }
}
