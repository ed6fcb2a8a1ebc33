use anyhow::Result;

use crate::models::user::User;

/// Who is submitting bills. Injected everywhere instead of reaching into
/// ambient key-value storage.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Result<User>;
}

/// Fixed identity, resolved once at startup (CLI) or per request (tests).
pub struct StaticSession {
    user: User,
}

impl StaticSession {
    pub fn employee(email: impl Into<String>) -> Self {
        StaticSession {
            user: User::employee(email),
        }
    }
}

impl SessionProvider for StaticSession {
    fn current_user(&self) -> Result<User> {
        Ok(self.user.clone())
    }
}
