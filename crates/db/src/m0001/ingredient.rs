use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::Ingredient;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(Ingredient::Table)
        .col(
            ColumnDef::new(Ingredient::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(Ingredient::Name)
                .string()
                .not_null()
                .string_len(20),
        )
        .col(
            ColumnDef::new(Ingredient::MeasurementUnit)
                .string()
                .not_null()
                .string_len(8)
                .default("gram"),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(Ingredient::Table).to_owned()
}

operation!(CreateTable, create_table(), drop_table());

fn create_uk_1() -> IndexCreateStatement {
    Index::create()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .col(Ingredient::Name)
        .col(Ingredient::MeasurementUnit)
        .unique()
        .to_owned()
}

fn drop_uk_1() -> IndexDropStatement {
    Index::drop()
        .name("uk_ingredient_name_unit")
        .table(Ingredient::Table)
        .to_owned()
}

operation!(CreateUk1, create_uk_1(), drop_uk_1());
