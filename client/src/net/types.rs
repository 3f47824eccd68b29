//! Wire DTOs for the local `/api/auth/*` surface.
//!
//! DESIGN
//! ======
//! The upstream profile shape is not guaranteed, so `User` tolerates missing
//! fields and accepts numbers where strings are expected.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// The authenticated principal. Replaced wholesale, never patched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub success: bool,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub login: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub nick: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub conn_type: String,
    #[serde(deserialize_with = "deserialize_lenient_string")]
    pub role: String,
}

/// Login form input.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self { login: login.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `POST /api/auth/login` success body.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub data: Option<LoginData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(default)]
    pub user: User,
}

/// `GET /api/auth/check-session` success body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionCheck {
    #[serde(default)]
    pub success: bool,
    pub data: Option<SessionCheckData>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SessionCheckData {
    #[serde(rename = "hasSession", default)]
    pub has_session: bool,
}

impl SessionCheck {
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.has_session)
    }
}

/// Error body rendered by the gateway.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    #[serde(rename = "statusMessage")]
    pub status_message: Option<String>,
}

impl ErrorBody {
    /// Most specific non-empty message.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message
            .into_iter()
            .chain(self.status_message)
            .find(|m| !m.trim().is_empty())
    }
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => s == "true",
        _ => false,
    })
}
