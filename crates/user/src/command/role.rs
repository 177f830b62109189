use crate::{
    Role,
    repository::{self, FindType},
};

impl super::Command {
    pub async fn set_role_by_email(
        &self,
        email: impl Into<String>,
        role: Role,
    ) -> recipebox_shared::Result<String> {
        let email = email.into();
        let Some(user) = repository::find(&self.read_db, FindType::Email(email.to_owned())).await?
        else {
            return Err(recipebox_shared::Error::not_found(format!("user {email}")));
        };

        repository::update_role(&self.write_db, &user.id, role).await?;

        Ok(user.id)
    }
}
