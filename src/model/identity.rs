use serde::{Deserialize, Serialize};

/// An authenticated user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

/// Payload for creating a new account.
#[derive(Clone)]
pub struct SignUp {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Payload for signing in to an existing account.
#[derive(Clone)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

// Passwords never reach the logs.
impl std::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUp")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl std::fmt::Debug for SignIn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignIn")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
