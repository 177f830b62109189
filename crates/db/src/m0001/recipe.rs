use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Recipe::Table)
        .col(
            ColumnDef::new(Recipe::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Recipe::AuthorId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(Recipe::Name)
                .string()
                .not_null()
                .string_len(30),
        )
        .col(ColumnDef::new(Recipe::Image).text().null())
        .col(ColumnDef::new(Recipe::Text).text().not_null())
        .col(ColumnDef::new(Recipe::CookingTime).integer().not_null())
        .col(ColumnDef::new(Recipe::CreatedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_recipe_author")
                .from(Recipe::Table, Recipe::AuthorId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Recipe::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_idx_1() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_author")
        .table(Recipe::Table)
        .col(Recipe::AuthorId)
        .to_owned()
}

fn drop_idx_1() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_author")
        .table(Recipe::Table)
        .to_owned()
}

operation!(CreateIdx1, create_idx_1(), drop_idx_1());
