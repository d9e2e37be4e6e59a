//! Publishes the rotated token into a masked project variable.

use crate::error::AppError;
use crate::models::VariablePayload;
use crate::services::GitLabClient;

/// Which write `publish_variable` performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Created,
    Updated,
}

/// Store `value` in the masked variable `key`, creating it when absent.
pub async fn publish_variable(
    client: &GitLabClient,
    project_id: i64,
    key: &str,
    value: &str,
) -> Result<PublishOutcome, AppError> {
    let payload = VariablePayload {
        key,
        value,
        masked: true,
    };

    let existing = client.get_variable(project_id, key).await?;

    match existing {
        Some(variable) if variable.key == key => {
            log::info!("Variable [name: '{}'] already exists, update it", key);
            client.update_variable(project_id, &payload).await?;
            Ok(PublishOutcome::Updated)
        }
        _ => {
            log::info!("Create new variable [name: '{}']", key);
            client.create_variable(project_id, &payload).await?;
            Ok(PublishOutcome::Created)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gitlab_client::tests::client_for;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const VARIABLE_URL: &str = "/api/v4/projects/42/variables/GITLAB_TOKEN";

    fn variable_body(value: &str) -> String {
        json!({"key": "GITLAB_TOKEN", "value": value, "masked": true, "protected": false}).to_string()
    }

    #[tokio::test]
    async fn test_missing_variable_is_created() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", VARIABLE_URL)
            .with_status(404)
            .with_body(r#"{"message": "404 Variable Not Found"}"#)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/api/v4/projects/42/variables")
            .match_body(Matcher::Json(json!({
                "key": "GITLAB_TOKEN",
                "value": "glpat-one",
                "masked": true
            })))
            .with_status(201)
            .with_body(variable_body("glpat-one"))
            .expect(1)
            .create_async()
            .await;
        let update = server
            .mock("PUT", VARIABLE_URL)
            .expect(0)
            .create_async()
            .await;

        let outcome = publish_variable(&client_for(&server), 42, "GITLAB_TOKEN", "glpat-one")
            .await
            .unwrap();

        assert_eq!(outcome, PublishOutcome::Created);
        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn test_existing_variable_is_updated() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", VARIABLE_URL)
            .with_status(200)
            .with_body(variable_body("glpat-old"))
            .create_async()
            .await;
        let update = server
            .mock("PUT", VARIABLE_URL)
            .match_body(Matcher::Json(json!({
                "key": "GITLAB_TOKEN",
                "value": "glpat-two",
                "masked": true
            })))
            .with_status(200)
            .with_body(variable_body("glpat-two"))
            .expect(1)
            .create_async()
            .await;
        let create = server
            .mock("POST", "/api/v4/projects/42/variables")
            .expect(0)
            .create_async()
            .await;

        let outcome = publish_variable(&client_for(&server), 42, "GITLAB_TOKEN", "glpat-two")
            .await
            .unwrap();

        assert_eq!(outcome, PublishOutcome::Updated);
        update.assert_async().await;
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_mismatched_key_is_created() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", VARIABLE_URL)
            .with_status(200)
            .with_body(json!({"key": "OTHER", "value": "x", "masked": false}).to_string())
            .create_async()
            .await;
        let create = server
            .mock("POST", "/api/v4/projects/42/variables")
            .with_status(201)
            .with_body(variable_body("glpat-one"))
            .expect(1)
            .create_async()
            .await;

        let outcome = publish_variable(&client_for(&server), 42, "GITLAB_TOKEN", "glpat-one")
            .await
            .unwrap();

        assert_eq!(outcome, PublishOutcome::Created);
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_lookup_error_aborts() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", VARIABLE_URL)
            .with_status(500)
            .create_async()
            .await;
        let writes = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let err = publish_variable(&client_for(&server), 42, "GITLAB_TOKEN", "glpat-one")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        writes.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_update_propagates() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", VARIABLE_URL)
            .with_status(200)
            .with_body(variable_body("glpat-old"))
            .create_async()
            .await;
        let _m = server
            .mock("PUT", VARIABLE_URL)
            .with_status(400)
            .with_body(r#"{"message": {"value": ["is invalid"]}}"#)
            .create_async()
            .await;

        let err = publish_variable(&client_for(&server), 42, "GITLAB_TOKEN", "short")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(400));
        assert!(err.to_string().contains("is invalid"));
    }
}
