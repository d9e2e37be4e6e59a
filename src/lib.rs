//! GitLab token rotator.
//!
//! Replaces each listed project's author-tagged access token with a fresh
//! one and stores its value in a masked CI/CD variable, so the project's
//! pipelines never run with an expired credential.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use config::{read_credential, RotationPolicy, Settings};
pub use error::AppError;
pub use services::{run_batch, BatchSummary, GitLabClient};
