//! Resolves `namespace/project` paths to GitLab project IDs.

use crate::error::AppError;
use crate::models::project_name;
use crate::services::GitLabClient;

/// Resolve a project path to its numeric ID.
///
/// Searches GitLab for the last path segment and picks the record whose
/// `path_with_namespace` matches exactly.
///
/// # Returns
/// `Ok(None)` when no search result matches the full path.
pub async fn resolve_project_id(
    client: &GitLabClient,
    path_with_namespace: &str,
) -> Result<Option<i64>, AppError> {
    let projects = client
        .search_projects(project_name(path_with_namespace))
        .await?;

    Ok(projects
        .into_iter()
        .find(|p| p.path_with_namespace == path_with_namespace)
        .map(|p| p.id))
}
