//! Business logic services.
//!
//! The resolver, token rotator and variable publisher each wrap one step
//! of a rotation over the shared [`GitLabClient`]; the batch driver
//! chains them for every project in the list.

pub mod batch;
pub mod gitlab_client;
pub mod resolver;
pub mod token_rotator;
pub mod variable_publisher;

pub use batch::{load_project_list, parse_project_list, run_batch, BatchSummary};
pub use gitlab_client::{GitLabClient, GitLabClientConfig};
pub use resolver::resolve_project_id;
pub use token_rotator::{expiry_date, rotate_token, StaleTokens, TOKEN_SCOPES};
pub use variable_publisher::{publish_variable, PublishOutcome};
