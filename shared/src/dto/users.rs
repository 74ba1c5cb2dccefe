use serde::{Deserialize, Serialize};

/// User record as returned by `GET /users` and embedded in some login payloads.
///
/// Only `id` and `username` are always present; every other field falls back
/// to `None` when missing or `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    /// `true` for male, `false` for female
    #[serde(default)]
    pub gender: Option<bool>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub role_name: Option<String>,
}

impl User {
    /// Name to show in lists: full name when known, username otherwise.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Role derived from `roleId`, falling back to `roleName`.
    pub fn role(&self) -> Role {
        match self.role_id {
            Some(id) => Role::from_id(id),
            None => self
                .role_name
                .as_deref()
                .map(Role::from_name)
                .unwrap_or(Role::Member),
        }
    }
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Staff,
    Member,
}

impl Role {
    pub fn from_id(id: i64) -> Self {
        match id {
            1 => Role::Admin,
            2 => Role::Staff,
            _ => Role::Member,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "admin" => Role::Admin,
            "staff" => Role::Staff,
            _ => Role::Member,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Member => "Member",
        }
    }
}

/// User creation request (`POST /users`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub gender: bool,
    /// ISO-8601 date, e.g. `1990-05-17`
    pub date_of_birth: String,
    pub address: String,
    pub phone: String,
    pub avatar: String,
    pub role_name: String,
}
