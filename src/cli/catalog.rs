use recipebox_recipe::{IngredientInput, TagInput, Unit};
use recipebox_shared::State;

async fn command(config: &crate::config::Config) -> anyhow::Result<recipebox_recipe::Command> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;

    Ok(recipebox_recipe::Command(State {
        read_db: pool.clone(),
        write_db: pool,
    }))
}

pub async fn add_ingredient(
    config: crate::config::Config,
    name: String,
    unit: Unit,
) -> anyhow::Result<()> {
    let command = command(&config).await?;
    let id = command
        .create_ingredient(IngredientInput {
            name: name.to_owned(),
            unit,
        })
        .await?;

    tracing::info!(ingredient.id = %id, "ingredient {name} ({unit}) added");

    Ok(())
}

pub async fn add_tag(
    config: crate::config::Config,
    name: String,
    color: String,
    slug: String,
) -> anyhow::Result<()> {
    let command = command(&config).await?;
    let id = command
        .create_tag(TagInput {
            name,
            color,
            slug: slug.to_owned(),
        })
        .await?;

    tracing::info!(tag.id = %id, "tag {slug} added");

    Ok(())
}
