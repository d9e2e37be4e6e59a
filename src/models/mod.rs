//! Data models for the GitLab entities this tool reads and writes.
//!
//! All durable state lives on the GitLab side; these types only mirror
//! API payloads and the lines of the project list.

pub mod access_token;
pub mod project;
pub mod variable;

// Re-exports for convenient access
pub use access_token::{NewAccessToken, ProjectAccessToken};
pub use project::{project_name, GitLabProject, ProjectEntry};
pub use variable::{ProjectVariable, VariablePayload};
