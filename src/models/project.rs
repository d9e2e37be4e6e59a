//! GitLab project models.

use serde::Deserialize;

/// Project record from the search API (`GET /search?scope=projects`).
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    /// GitLab project ID.
    pub id: i64,

    /// Short project name (e.g., "GitLab").
    #[serde(default)]
    pub name: Option<String>,

    /// Path with namespace (e.g., "gitlab-org/gitlab").
    pub path_with_namespace: String,

    /// Web URL for the project.
    #[serde(default)]
    pub web_url: Option<String>,
}

/// One line of the project list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectEntry {
    /// Line whose trimmed form starts with `#`.
    Comment,

    /// Project path candidate (`namespace/project`), trailing whitespace removed.
    Path(String),
}

impl ProjectEntry {
    /// Classify a raw line from the project list.
    ///
    /// Only `#`-prefixed lines are comments. Blank lines become empty path
    /// candidates and are resolved like any other path.
    pub fn parse(line: &str) -> Self {
        if line.trim().starts_with('#') {
            Self::Comment
        } else {
            Self::Path(line.trim_end().to_string())
        }
    }

    /// The project path, or `None` for comments.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Comment => None,
            Self::Path(path) => Some(path),
        }
    }
}

/// Last segment of a `namespace/project` path, used as the search term.
pub fn project_name(path_with_namespace: &str) -> &str {
    path_with_namespace
        .rsplit('/')
        .next()
        .unwrap_or(path_with_namespace)
}
