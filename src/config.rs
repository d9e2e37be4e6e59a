//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser};

use crate::error::AppError;
use crate::services::GitLabClientConfig;

/// Default GitLab instance.
pub const DEFAULT_GITLAB_URL: &str = "https://gitlab.example.org";

/// Environment variable holding the caller's own token.
pub const DEFAULT_TOKEN_ENV: &str = "GITLAB_TOKEN";

/// What a rotation creates and where it stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Name given to every token this tool creates.
    pub author: String,

    /// Project variable receiving the new token.
    pub variable_key: String,

    /// Days until a new token expires.
    pub lifetime_days: u32,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            author: "Notes".to_string(),
            variable_key: "GITLAB_TOKEN".to_string(),
            lifetime_days: 7,
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "rotate-token")]
#[command(about = "Rotate GitLab project access tokens into masked CI/CD variables")]
#[command(version)]
pub struct Settings {
    /// GitLab instance URL
    #[arg(long, env = "GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    pub gitlab_url: String,

    /// File listing one `namespace/project` per line (`#` starts a comment)
    #[arg(long, env = "ROTATE_PROJECTS_FILE", default_value = "./projects.txt")]
    pub projects_file: PathBuf,

    /// Name given to the rotated project access token
    #[arg(long, env = "ROTATE_TOKEN_AUTHOR", default_value = "Notes")]
    pub author: String,

    /// Project variable that receives the new token
    #[arg(long = "variable", env = "ROTATE_VARIABLE_KEY", default_value = "GITLAB_TOKEN")]
    pub variable_key: String,

    /// Environment variable holding your own GitLab token
    #[arg(long, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Days until the new token expires
    #[arg(long, env = "ROTATE_TOKEN_LIFETIME_DAYS", default_value_t = 7)]
    pub lifetime_days: u32,

    /// HTTP request timeout in seconds
    #[arg(long, env = "ROTATE_HTTP_TIMEOUT", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[arg(long, env = "ROTATE_INSECURE", value_parser = FalseyValueParser::new())]
    pub insecure: bool,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Settings {
    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    /// Validate the settings that do not need the credential.
    pub fn rotation_policy(&self) -> Result<RotationPolicy, AppError> {
        if self.author.trim().is_empty() {
            return Err(AppError::configuration("Token author must not be empty"));
        }
        if self.variable_key.trim().is_empty() {
            return Err(AppError::configuration("Variable key must not be empty"));
        }
        if self.lifetime_days == 0 {
            return Err(AppError::configuration(
                "Token lifetime must be at least one day",
            ));
        }

        Ok(RotationPolicy {
            author: self.author.clone(),
            variable_key: self.variable_key.clone(),
            lifetime_days: self.lifetime_days,
        })
    }

    /// Build the client configuration around the caller's credential.
    pub fn client_config(&self, token: String) -> Result<GitLabClientConfig, AppError> {
        let url = self.gitlab_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::configuration(format!(
                "GitLab URL must start with http:// or https://: '{}'",
                url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::configuration("Timeout must be at least one second"));
        }

        Ok(GitLabClientConfig {
            base_url: url.trim_end_matches('/').to_string(),
            token,
            timeout_secs: self.timeout_secs,
            verify_tls: !self.insecure,
        })
    }
}

/// Read the caller's GitLab token from the environment.
pub fn read_credential(var_name: &str) -> Result<String, AppError> {
    match std::env::var(var_name) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::configuration(format!(
            "Please set the '{}' environment variable",
            var_name
        ))),
    }
}
