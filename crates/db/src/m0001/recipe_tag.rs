use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, RecipeTag, Tag};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeTag::Table)
        .col(
            ColumnDef::new(RecipeTag::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeTag::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeTag::TagId)
                .string()
                .not_null()
                .string_len(26),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_recipe")
                .from(RecipeTag::Table, RecipeTag::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_tag_tag")
                .from(RecipeTag::Table, RecipeTag::TagId)
                .to(Tag::Table, Tag::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeTag::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_recipe_tag")
        .table(RecipeTag::Table)
        .col(RecipeTag::RecipeId)
        .col(RecipeTag::TagId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_recipe_tag")
        .table(RecipeTag::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1(), drop_uk_1());
