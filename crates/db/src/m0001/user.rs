use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::User;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(User::Table)
        .col(
            ColumnDef::new(User::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(User::Email)
                .string()
                .not_null()
                .string_len(254),
        )
        .col(
            ColumnDef::new(User::Username)
                .string()
                .not_null()
                .string_len(150),
        )
        .col(
            ColumnDef::new(User::FirstName)
                .string()
                .not_null()
                .string_len(150)
                .default(""),
        )
        .col(
            ColumnDef::new(User::LastName)
                .string()
                .not_null()
                .string_len(150)
                .default(""),
        )
        .col(ColumnDef::new(User::PasswordHash).string().not_null())
        .col(
            ColumnDef::new(User::Role)
                .string()
                .not_null()
                .string_len(10)
                .default("user"),
        )
        .col(ColumnDef::new(User::CreatedAt).big_integer().not_null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(User::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_user_email")
        .table(User::Table)
        .col(User::Email)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_user_email")
        .table(User::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1(), drop_uk_1());

fn create_uk_2() -> IndexCreateStatement {
    Index::create()
        .name("uk_user_username")
        .table(User::Table)
        .col(User::Username)
        .unique()
        .to_owned()
}

fn drop_uk_2() -> IndexDropStatement {
    Index::drop()
        .name("uk_user_username")
        .table(User::Table)
        .to_owned()
}

operation!(CreateUk2, create_uk_2(), drop_uk_2());
