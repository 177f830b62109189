use recipebox_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use crate::Unit;

#[derive(Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub unit: Unit,
}

#[derive(Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 4, max = 7))]
    pub color: String,
    #[validate(length(min = 1, max = 200))]
    pub slug: String,
}

impl super::Command {
    pub async fn create_ingredient(
        &self,
        input: IngredientInput,
    ) -> recipebox_shared::Result<String> {
        input.validate()?;

        let statement = Query::select()
            .column(Ingredient::Id)
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Name).eq(input.name.as_str()))
            .and_where(Expr::col(Ingredient::MeasurementUnit).eq(input.unit.as_ref()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            recipebox_shared::bail!("Ingredient already exists");
        }

        let id = recipebox_shared::new_id();
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.unit.to_string().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(ingredient.id = %id, "ingredient created");

        Ok(id)
    }

    pub async fn create_tag(&self, input: TagInput) -> recipebox_shared::Result<String> {
        input.validate()?;

        if !input.color.starts_with('#') || !input.color[1..].chars().all(|c| c.is_ascii_hexdigit())
        {
            recipebox_shared::bail!("Color must be a hex code like #49B64E");
        }

        if !input
            .slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            recipebox_shared::bail!("Slug may only contain letters, digits, '-' and '_'");
        }

        let statement = Query::select()
            .column(Tag::Id)
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Slug).eq(input.slug.as_str()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        if sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?
            .is_some()
        {
            recipebox_shared::bail!("Tag slug already exists");
        }

        let id = recipebox_shared::new_id();
        let statement = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .values_panic([
                id.to_owned().into(),
                input.name.into(),
                input.color.into(),
                input.slug.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?;

        tracing::info!(tag.id = %id, "tag created");

        Ok(id)
    }
}
