//! Project CI/CD variable models.

use serde::{Deserialize, Serialize};

/// Project variable from `GET /projects/:id/variables/:key`.
#[derive(Clone, Deserialize)]
pub struct ProjectVariable {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub masked: bool,
    #[serde(default)]
    pub protected: bool,
}

impl std::fmt::Debug for ProjectVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectVariable")
            .field("key", &self.key)
            .field("masked", &self.masked)
            .field("protected", &self.protected)
            .finish_non_exhaustive()
    }
}

/// Body for creating or updating a project variable.
#[derive(Serialize)]
pub struct VariablePayload<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub masked: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let payload = VariablePayload {
            key: "GITLAB_TOKEN",
            value: "glpat-abc&def=1",
            masked: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"key": "GITLAB_TOKEN", "value": "glpat-abc&def=1", "masked": true})
        );
    }

    #[test]
    fn test_debug_omits_value() {
        let variable: ProjectVariable = serde_json::from_str(
            r#"{"key": "GITLAB_TOKEN", "value": "glpat-secret", "masked": true, "variable_type": "env_var"}"#,
        )
        .unwrap();
        assert!(variable.masked);
        assert!(!format!("{:?}", variable).contains("glpat-secret"));
    }
}
