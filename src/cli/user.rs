use clap::ValueEnum;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Role {
    User,
    Admin,
}

impl From<Role> for recipebox_user::Role {
    fn from(value: Role) -> Self {
        match value {
            Role::User => recipebox_user::Role::User,
            Role::Admin => recipebox_user::Role::Admin,
        }
    }
}

pub async fn set_role(
    config: crate::config::Config,
    email: String,
    role: Role,
) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    let command = recipebox_user::Command(recipebox_shared::State {
        read_db: pool.clone(),
        write_db: pool.clone(),
    });

    let role = recipebox_user::Role::from(role);
    command.set_role_by_email(&email, role).await?;

    tracing::info!("{email} now has the {role} role");

    pool.close().await;

    Ok(())
}
