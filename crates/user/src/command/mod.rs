use std::ops::Deref;

use recipebox_shared::State;

mod follow;
mod login;
mod register;
mod role;

pub use login::LoginInput;
pub use register::RegisterInput;

#[derive(Clone)]
pub struct Command(pub State);

impl Deref for Command {
    type Target = State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
