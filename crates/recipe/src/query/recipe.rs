use recipebox_db::table::{
    Favorite, Ingredient, Recipe, RecipeIngredient, RecipeTag, ShoppingCart, Tag,
};
use recipebox_shared::{Page, PageArgs};
use recipebox_user::Profile;
use sea_query::{
    Expr, ExprTrait, Func, IntoColumnRef, IntoTableRef, Order, Query as Select, SelectStatement,
    SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{prelude::FromRow, types::Text};

use super::TagView;
use crate::{Unit, repository};

#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author: Option<String>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeIngredientView {
    pub id: String,
    pub name: String,
    pub measurement_unit: Unit,
    pub amount: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub author: Profile,
    pub name: String,
    pub image: Option<String>,
    pub text: String,
    pub cooking_time: u32,
    pub tags: Vec<TagView>,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub created_at: i64,
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    author_id: String,
    name: String,
    image: Option<String>,
    text: String,
    cooking_time: u32,
    created_at: i64,
}

#[derive(FromRow)]
struct LineRow {
    id: String,
    name: String,
    measurement_unit: Text<Unit>,
    amount: Option<u32>,
}

const RECIPE_COLUMNS: [Recipe; 7] = [
    Recipe::Id,
    Recipe::AuthorId,
    Recipe::Name,
    Recipe::Image,
    Recipe::Text,
    Recipe::CookingTime,
    Recipe::CreatedAt,
];

fn recipe_ids_of(
    table: impl IntoTableRef,
    user: impl IntoColumnRef,
    recipe: impl IntoColumnRef,
    user_id: &str,
) -> SelectStatement {
    Select::select()
        .column(recipe)
        .from(table)
        .and_where(Expr::col(user).eq(user_id))
        .to_owned()
}

impl super::Query {
    pub async fn find_recipe(
        &self,
        id: impl Into<String>,
        viewer_id: Option<&str>,
    ) -> recipebox_shared::Result<Option<RecipeView>> {
        let (sql, values) = Select::select()
            .columns(RECIPE_COLUMNS)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id.into()))
            .limit(1)
            .build_sqlx(SqliteQueryBuilder);

        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.to_view(row, viewer_id).await?))
    }

    /// Recipes ordered by name then creation time. Viewer relative filters
    /// match nothing for anonymous viewers.
    pub async fn filter_recipes(
        &self,
        filter: RecipeFilter,
        args: PageArgs,
        viewer_id: Option<&str>,
    ) -> recipebox_shared::Result<Page<RecipeView>> {
        if (filter.is_favorited || filter.is_in_shopping_cart) && viewer_id.is_none() {
            return Ok(Page {
                count: 0,
                results: vec![],
            });
        }

        let mut statement = Select::select().from(Recipe::Table).to_owned();

        if let Some(author) = filter.author {
            statement.and_where(Expr::col(Recipe::AuthorId).eq(author));
        }

        if !filter.tags.is_empty() {
            statement.and_where(
                Expr::col(Recipe::Id).in_subquery(
                    Select::select()
                        .column((RecipeTag::Table, RecipeTag::RecipeId))
                        .from(RecipeTag::Table)
                        .inner_join(
                            Tag::Table,
                            Expr::col((Tag::Table, Tag::Id))
                                .equals((RecipeTag::Table, RecipeTag::TagId)),
                        )
                        .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags))
                        .to_owned(),
                ),
            );
        }

        if let Some(viewer_id) = viewer_id {
            if filter.is_favorited {
                statement.and_where(Expr::col(Recipe::Id).in_subquery(recipe_ids_of(
                    Favorite::Table,
                    Favorite::UserId,
                    Favorite::RecipeId,
                    viewer_id,
                )));
            }

            if filter.is_in_shopping_cart {
                statement.and_where(Expr::col(Recipe::Id).in_subquery(recipe_ids_of(
                    ShoppingCart::Table,
                    ShoppingCart::UserId,
                    ShoppingCart::RecipeId,
                    viewer_id,
                )));
            }
        }

        let (sql, values) = statement
            .clone()
            .expr(Func::count(Expr::col((Recipe::Table, Recipe::Id))))
            .build_sqlx(SqliteQueryBuilder);

        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        let (sql, values) = statement
            .columns(RECIPE_COLUMNS.map(|column| (Recipe::Table, column)))
            .order_by(Recipe::Name, Order::Asc)
            .order_by(Recipe::CreatedAt, Order::Asc)
            .limit(args.limit())
            .offset(args.offset())
            .build_sqlx(SqliteQueryBuilder);

        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            results.push(self.to_view(row, viewer_id).await?);
        }

        Ok(Page {
            count: count.try_into().unwrap_or(0),
            results,
        })
    }

    async fn to_view(
        &self,
        row: RecipeRow,
        viewer_id: Option<&str>,
    ) -> recipebox_shared::Result<RecipeView> {
        let author = recipebox_user::Query(self.0.clone())
            .find_profile(&row.author_id, viewer_id)
            .await?
            .ok_or_else(|| {
                recipebox_shared::Error::Integrity(format!(
                    "recipe {} has no author {}",
                    row.id, row.author_id
                ))
            })?;

        let (sql, values) = Select::select()
            .columns([
                (Tag::Table, Tag::Id),
                (Tag::Table, Tag::Name),
                (Tag::Table, Tag::Color),
                (Tag::Table, Tag::Slug),
            ])
            .from(Tag::Table)
            .inner_join(
                RecipeTag::Table,
                Expr::col((RecipeTag::Table, RecipeTag::TagId)).equals((Tag::Table, Tag::Id)),
            )
            .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).eq(row.id.as_str()))
            .order_by_expr(Expr::cust("\"tag\".\"rowid\""), Order::Asc)
            .build_sqlx(SqliteQueryBuilder);

        let tags = sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        let (sql, values) = Select::select()
            .columns([
                (Ingredient::Table, Ingredient::Id),
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(RecipeIngredient::Table)
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .eq(row.id.as_str()),
            )
            .order_by(
                (RecipeIngredient::Table, RecipeIngredient::Position),
                Order::Asc,
            )
            .build_sqlx(SqliteQueryBuilder);

        let ingredients = sqlx::query_as_with::<_, LineRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?
            .into_iter()
            .map(|line| RecipeIngredientView {
                id: line.id,
                name: line.name,
                measurement_unit: line.measurement_unit.0,
                amount: line.amount,
            })
            .collect();

        let (is_favorited, is_in_shopping_cart) = match viewer_id {
            Some(viewer_id) => (
                repository::is_favorite(&self.0, viewer_id, &row.id).await?,
                repository::is_in_cart(&self.0, viewer_id, &row.id).await?,
            ),
            None => (false, false),
        };

        Ok(RecipeView {
            id: row.id,
            author,
            name: row.name,
            image: row.image,
            text: row.text,
            cooking_time: row.cooking_time,
            tags,
            ingredients,
            is_favorited,
            is_in_shopping_cart,
            created_at: row.created_at,
        })
    }
}
