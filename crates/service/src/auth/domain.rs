use serde::{Deserialize, Serialize};

/// Email/password pair used for registration and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registered {
    pub user_id: i64,
}

/// Login/refresh result; the token is what mutating routes expect as bearer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub refresh_token: String,
}
