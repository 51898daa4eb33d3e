//! Login and signup forms.

mod render;
mod update;

pub use render::{render_login, render_signup};
pub use update::{
    enter_login, enter_signup, handle_event, handle_login_key, handle_signup_key,
    login_form_visible,
};

use crate::common::{Form, TextField};

pub(crate) const EMAIL: usize = 0;
pub(crate) const PASSWORD: usize = 1;

pub(crate) const NAME: usize = 0;
pub(crate) const SIGNUP_EMAIL: usize = 1;
pub(crate) const SIGNUP_PASSWORD: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginState {
    pub form: Form,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![TextField::new("Email"), TextField::masked("Password")]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupState {
    pub form: Form,
}

impl Default for SignupState {
    fn default() -> Self {
        Self {
            form: Form::new(vec![
                TextField::new("Name"),
                TextField::new("Email"),
                TextField::masked("Password"),
            ]),
        }
    }
}
