//! Project access token models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Project access token from `GET /projects/:id/access_tokens`.
///
/// The secret `token` field is only present in the creation response.
#[derive(Clone, Deserialize)]
pub struct ProjectAccessToken {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub revoked: bool,
    #[serde(default)]
    pub active: Option<bool>,
    pub expires_at: Option<NaiveDate>,
    #[serde(default)]
    pub token: Option<String>,
}

// Keeps the secret out of logs and panic messages.
impl std::fmt::Debug for ProjectAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectAccessToken")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("scopes", &self.scopes)
            .field("revoked", &self.revoked)
            .field("active", &self.active)
            .field("expires_at", &self.expires_at)
            .field("token", &self.token.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl ProjectAccessToken {
    /// Whether this is a live token named `author` carrying exactly `scopes`.
    pub fn is_rotatable(&self, author: &str, scopes: &[&str]) -> bool {
        self.name == author
            && !self.revoked
            && self.scopes.len() == scopes.len()
            && self.scopes.iter().zip(scopes).all(|(have, want)| have == want)
    }
}

/// Body for `POST /projects/:id/access_tokens`.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccessToken<'a> {
    pub name: &'a str,
    pub scopes: &'a [&'a str],
    pub expires_at: NaiveDate,
}
