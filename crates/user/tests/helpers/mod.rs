use std::{path::PathBuf, str::FromStr};

use recipebox_shared::State;
use recipebox_user::RegisterInput;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    recipebox_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State {
        read_db: pool.clone(),
        write_db: pool,
    })
}

#[allow(dead_code)]
pub async fn register(cmd: &recipebox_user::Command, name: &str) -> anyhow::Result<String> {
    Ok(cmd
        .register(RegisterInput {
            email: format!("{name}@recipebox.localhost"),
            username: name.to_owned(),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}
