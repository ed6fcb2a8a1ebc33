use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(rename = "type")]
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    Employee,
    Admin,
}

impl User {
    pub fn employee(email: impl Into<String>) -> Self {
        User {
            email: email.into(),
            role: UserRole::Employee,
        }
    }
}
