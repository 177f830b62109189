use argon2::{Argon2, PasswordHash, PasswordVerifier};
use validator::Validate;

use crate::repository::{self, FindType};

#[derive(Validate)]
pub struct LoginInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Checks credentials and issues an access token.
    pub async fn login(
        &self,
        input: LoginInput,
        secret: &str,
        lifetime_seconds: u64,
    ) -> recipebox_shared::Result<String> {
        input.validate()?;

        let Some(user) = repository::find(&self.read_db, FindType::Email(input.email)).await?
        else {
            recipebox_shared::bail!("Unable to log in with provided credentials.");
        };

        let parsed_hash = PasswordHash::new(&user.password_hash)?;

        if Argon2::default()
            .verify_password(input.password.as_bytes(), &parsed_hash)
            .is_err()
        {
            recipebox_shared::bail!("Unable to log in with provided credentials.");
        }

        Ok(crate::generate_token(
            &user.id,
            user.is_admin(),
            secret,
            lifetime_seconds,
        )?)
    }
}
