//! Signed-in admin context passed to every authenticated call.

use std::fmt::{Debug, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub struct AdminSession {
    token: String,
    email: String,
}

impl AdminSession {
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: email.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// Keeps the token out of logs.
impl Debug for AdminSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
