use serde::{Deserialize, Serialize};

use super::users::User;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Error body returned by the API on non-success statuses.
///
/// The server is not consistent about which field carries the text, so all
/// known ones are optional and [`ErrorResponse::message`] picks the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ErrorResponse {
    /// First non-blank message field, if any.
    pub fn message(&self) -> Option<&str> {
        [&self.message, &self.error, &self.title]
            .into_iter()
            .flatten()
            .map(|m| m.trim())
            .find(|m| !m.is_empty())
    }
}

/// Successful login payload.
///
/// The login endpoint answers with the raw token. Depending on deployment the
/// body is a bare string, a JSON string, or an object `{ token, user }`; all
/// three decode into this type.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginPayload {
    pub token: String,
    pub user: Option<User>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLoginBody {
    Token(String),
    Object {
        #[serde(default)]
        token: Option<String>,
        #[serde(default)]
        user: Option<User>,
    },
}

impl LoginPayload {
    /// Decode a login response body. Returns `None` when no token can be found.
    pub fn from_body(body: &str) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }

        match serde_json::from_str::<RawLoginBody>(body) {
            Ok(RawLoginBody::Token(token)) => Self::non_empty(token, None),
            Ok(RawLoginBody::Object { token, user }) => token.and_then(|t| Self::non_empty(t, user)),
            // Not JSON at all: the body itself is the token
            Err(_) if !body.starts_with('{') && !body.starts_with('[') => {
                Self::non_empty(body.to_string(), None)
            }
            Err(_) => None,
        }
    }

    fn non_empty(token: String, user: Option<User>) -> Option<Self> {
        let token = token.trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self { token, user })
        }
    }
}
