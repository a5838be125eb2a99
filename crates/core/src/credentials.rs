//! Login credential validation.
//!
//! Checked locally before any network call, matching the login form rules:
//! email must be at least 4 characters and syntactically valid, password
//! between 4 and 30 characters.

use validator::Validate;

/// Login credentials as entered by the user.
#[derive(Debug, Clone, Validate)]
pub struct Credentials {
    #[validate(
        length(min = 4, message = "Email must be at least 4 characters"),
        email(message = "Invalid email address")
    )]
    pub email: String,

    #[validate(length(
        min = 4,
        max = 30,
        message = "Password must be between 4 and 30 characters"
    ))]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
