use recipebox_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, LikeExpr, Order, Query as Select, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{prelude::FromRow, types::Text};

use crate::Unit;

#[derive(Debug, Clone, Serialize)]
pub struct IngredientView {
    pub id: String,
    pub name: String,
    pub measurement_unit: Unit,
}

#[derive(FromRow)]
struct IngredientRow {
    id: String,
    name: String,
    measurement_unit: Text<Unit>,
}

impl From<IngredientRow> for IngredientView {
    fn from(row: IngredientRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            measurement_unit: row.measurement_unit.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagView {
    pub id: String,
    pub name: String,
    pub color: String,
    pub slug: String,
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl super::Query {
    /// Ingredients ordered by name, optionally restricted to a name prefix.
    /// SQLite `LIKE` folds ASCII case only.
    pub async fn list_ingredients(
        &self,
        name: Option<&str>,
    ) -> recipebox_shared::Result<Vec<IngredientView>> {
        let mut statement = Select::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .order_by(Ingredient::Name, Order::Asc)
            .order_by(Ingredient::MeasurementUnit, Order::Asc)
            .to_owned();

        if let Some(name) = name.filter(|name| !name.is_empty()) {
            statement.and_where(
                Expr::col(Ingredient::Name)
                    .like(LikeExpr::new(format!("{}%", escape_like(name))).escape('\\')),
            );
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_ingredient(
        &self,
        id: impl Into<String>,
    ) -> recipebox_shared::Result<Option<IngredientView>> {
        let (sql, values) = Select::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let row = sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Tags in insertion order.
    pub async fn list_tags(&self) -> recipebox_shared::Result<Vec<TagView>> {
        let (sql, values) = Select::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .order_by_expr(Expr::cust("\"tag\".\"rowid\""), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_tag(
        &self,
        id: impl Into<String>,
    ) -> recipebox_shared::Result<Option<TagView>> {
        let (sql, values) = Select::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
