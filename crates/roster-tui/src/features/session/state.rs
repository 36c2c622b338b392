//! Session state: the login form and who is signed in.

/// Focusable fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

impl LoginField {
    pub fn next(self) -> Self {
        match self {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        }
    }

    pub fn prev(self) -> Self {
        // Two fields: moving back is the same as moving forward.
        self.next()
    }
}

/// Login form contents.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    /// Message from the last failed sign-in, shown verbatim.
    pub error: Option<String>,
}

impl LoginForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    /// First required field that is still empty.
    pub fn first_missing(&self) -> Option<LoginField> {
        if self.email.trim().is_empty() {
            Some(LoginField::Email)
        } else if self.password.is_empty() {
            Some(LoginField::Password)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub login: LoginForm,
    /// Email of the signed-in account, once a session exists.
    pub signed_in: Option<String>,
}
