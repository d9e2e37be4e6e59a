//! Batch driver: rotates every project named in the project list.
//!
//! Projects are processed strictly in file order. A path that does not
//! resolve is skipped with a warning; any other failure aborts the run.

use std::path::Path;

use chrono::NaiveDate;

use crate::config::RotationPolicy;
use crate::error::AppError;
use crate::models::ProjectEntry;
use crate::services::{publish_variable, resolve_project_id, rotate_token, GitLabClient};

/// Result of a completed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Paths whose token and variable were rotated.
    pub rotated: Vec<String>,

    /// Paths that did not resolve to a project.
    pub skipped: Vec<String>,
}

/// Parse the contents of a project list.
pub fn parse_project_list(contents: &str) -> Vec<ProjectEntry> {
    contents.lines().map(ProjectEntry::parse).collect()
}

/// Read and parse the project list file.
pub fn load_project_list(path: &Path) -> Result<Vec<ProjectEntry>, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::invalid_input_field(
            format!("Cannot read project list {}: {}", path.display(), e),
            "projects_file",
        )
    })?;
    Ok(parse_project_list(&contents))
}

/// Rotate the token and variable of every project entry.
pub async fn run_batch(
    client: &GitLabClient,
    entries: &[ProjectEntry],
    policy: &RotationPolicy,
    today: NaiveDate,
) -> Result<BatchSummary, AppError> {
    let mut summary = BatchSummary::default();

    for path in entries.iter().filter_map(ProjectEntry::path) {
        log::info!("Processing: '{}'", path);

        let Some(project_id) = resolve_project_id(client, path).await? else {
            log::warn!("'{}' not found", path);
            summary.skipped.push(path.to_string());
            continue;
        };

        let token = rotate_token(client, project_id, policy, today).await?;
        publish_variable(client, project_id, &policy.variable_key, &token).await?;
        summary.rotated.push(path.to_string());
    }

    log::info!(
        "Done: rotated {}, skipped {}",
        summary.rotated.len(),
        summary.skipped.len()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_project_list() {
        let entries = parse_project_list("group/project-a\n# group/project-b\n\ngroup/project-c\n");
        let paths: Vec<&str> = entries.iter().filter_map(ProjectEntry::path).collect();
        assert_eq!(paths, vec!["group/project-a", "", "group/project-c"]);
        assert_eq!(entries.len(), 4);
    }

    #[test]
    fn test_parse_crlf_lines() {
        let entries = parse_project_list("group/a\r\n#group/b\r\n");
        assert_eq!(
            entries,
            vec![
                ProjectEntry::Path("group/a".to_string()),
                ProjectEntry::Comment
            ]
        );
    }

    #[test]
    fn test_load_project_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# managed by rotate-token").unwrap();
        writeln!(file, "team/app").unwrap();

        let entries = load_project_list(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![ProjectEntry::Comment, ProjectEntry::Path("team/app".to_string())]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_project_list(&dir.path().join("projects.txt")).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));
        assert!(err.to_string().contains("projects.txt"));
    }
}
