use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Ingredient, Recipe, RecipeIngredient};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeIngredient::Table)
        .col(
            ColumnDef::new(RecipeIngredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeIngredient::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeIngredient::IngredientId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(RecipeIngredient::Amount).integer().null())
        .col(
            ColumnDef::new(RecipeIngredient::Position)
                .integer()
                .not_null()
                .default(0),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_ingredient_recipe")
                .from(RecipeIngredient::Table, RecipeIngredient::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_ingredient_ingredient")
                .from(RecipeIngredient::Table, RecipeIngredient::IngredientId)
                .to(Ingredient::Table, Ingredient::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeIngredient::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_ingredient_recipe")
        .table(RecipeIngredient::Table)
        .col(RecipeIngredient::RecipeId)
        .col(RecipeIngredient::Position)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_ingredient_recipe")
        .table(RecipeIngredient::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1(), drop_idx_1());
