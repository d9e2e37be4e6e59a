//! Project access token rotation.
//!
//! Each project carries at most one live `api` token named after the
//! author tag. Rotation revokes that token when it is unambiguous and
//! always issues a fresh one.

use chrono::{Days, NaiveDate};

use crate::config::RotationPolicy;
use crate::error::AppError;
use crate::models::{NewAccessToken, ProjectAccessToken};
use crate::services::GitLabClient;

/// Scopes granted to every token this tool creates.
pub const TOKEN_SCOPES: &[&str] = &["api"];

/// Live author-tagged tokens found on a project before rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleTokens {
    None,
    Single(i64),
    Multiple(usize),
}

impl StaleTokens {
    /// Classify the tokens that rotation would replace.
    pub fn classify(tokens: &[ProjectAccessToken], author: &str) -> Self {
        let matching: Vec<i64> = tokens
            .iter()
            .filter(|t| t.is_rotatable(author, TOKEN_SCOPES))
            .map(|t| t.id)
            .collect();

        match matching.as_slice() {
            [] => Self::None,
            [id] => Self::Single(*id),
            many => Self::Multiple(many.len()),
        }
    }
}

/// Expiry date for a token created on `today`.
pub fn expiry_date(today: NaiveDate, lifetime_days: u32) -> Result<NaiveDate, AppError> {
    today
        .checked_add_days(Days::new(u64::from(lifetime_days)))
        .ok_or_else(|| AppError::invalid_input_field("Token expiry out of range", "lifetime_days"))
}

/// Replace the author-tagged token of a project.
///
/// # Returns
/// The secret value of the newly created token.
pub async fn rotate_token(
    client: &GitLabClient,
    project_id: i64,
    policy: &RotationPolicy,
    today: NaiveDate,
) -> Result<String, AppError> {
    let author = policy.author.as_str();
    let tokens = client.list_access_tokens(project_id).await?;

    match StaleTokens::classify(&tokens, author) {
        StaleTokens::None => {}
        StaleTokens::Single(token_id) => {
            log::info!(
                "Token [name: '{}', id: '{}'] already exists, delete it",
                author,
                token_id
            );
            client.delete_access_token(project_id, token_id).await?;
        }
        StaleTokens::Multiple(count) => {
            log::warn!(
                "There are {} active '{}' tokens on project {}, none deleted",
                count,
                author,
                project_id
            );
        }
    }

    log::info!("Create new token [name: '{}']", author);
    let request = NewAccessToken {
        name: author,
        scopes: TOKEN_SCOPES,
        expires_at: expiry_date(today, policy.lifetime_days)?,
    };
    let created = client.create_access_token(project_id, &request).await?;

    created.token.ok_or_else(|| {
        AppError::gitlab_api(format!(
            "Token creation for project {} returned no token value",
            project_id
        ))
    })
}
