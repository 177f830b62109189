use sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, IndexDropStatement,
    Table, TableCreateStatement, TableDropStatement,
};

use crate::table::{Recipe, ShoppingCart, User};

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(ShoppingCart::Table)
        .col(
            ColumnDef::new(ShoppingCart::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(ShoppingCart::UserId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(ShoppingCart::RecipeId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(ShoppingCart::AddedAt).big_integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_cart_user")
                .from(ShoppingCart::Table, ShoppingCart::UserId)
                .to(User::Table, User::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_shopping_cart_recipe")
                .from(ShoppingCart::Table, ShoppingCart::RecipeId)
                .to(Recipe::Table, Recipe::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(ShoppingCart::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_shopping_cart_user_recipe")
        .table(ShoppingCart::Table)
        .col(ShoppingCart::UserId)
        .col(ShoppingCart::RecipeId)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_shopping_cart_user_recipe")
        .table(ShoppingCart::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1(), drop_uk_1());
