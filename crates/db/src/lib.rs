use sqlx_migrator::{Info, Migrator};

/// Wraps a sea-query create/drop pair into a `sqlx_migrator` operation.
macro_rules! operation {
    ($name:ident, $up:expr, $down:expr) => {
        pub struct $name;

        #[async_trait::async_trait]
        impl sqlx_migrator::Operation<sqlx::Sqlite> for $name {
            async fn up(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $up.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }

            async fn down(
                &self,
                connection: &mut sqlx::SqliteConnection,
            ) -> Result<(), sqlx_migrator::Error> {
                let statement = $down.to_string(sea_query::SqliteQueryBuilder);
                sqlx::query(&statement).execute(connection).await?;

                Ok(())
            }
        }
    };
}

mod m0001;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0001::Migration)])?;

    Ok(migrator)
}
