use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    #[validate(length(max = 150))]
    pub first_name: String,
    #[validate(length(max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> recipebox_shared::Result<String> {
        input.validate()?;

        if repository::find(&self.read_db, FindType::Email(input.email.to_owned()))
            .await?
            .is_some()
        {
            recipebox_shared::bail!("Email already exists");
        }

        if repository::find(&self.read_db, FindType::Username(input.username.to_owned()))
            .await?
            .is_some()
        {
            recipebox_shared::bail!("Username already exists");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)?
            .to_string();

        let id = recipebox_shared::new_id();

        repository::create(
            &self.write_db,
            repository::CreateInput {
                id: id.to_owned(),
                email: input.email,
                username: input.username,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash,
            },
        )
        .await?;

        tracing::info!(user.id = %id, "user registered");

        Ok(id)
    }
}
