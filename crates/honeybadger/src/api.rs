//! Typed accessors for the Honeybadger API.
//!
//! Each accessor is a single [`Transport`] call plus response-shape
//! normalization. Only read operations exist.

use crate::domain::{AffectedUser, Fault, Notice, Project, ProjectsEnvelope};
use crate::error::Result;
use crate::transport::{QueryParams, Transport, with_query};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only Honeybadger API client.
pub struct HoneybadgerApi {
    transport: Arc<dyn Transport>,
}

impl HoneybadgerApi {
    /// Create a client on top of a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// List all projects visible to the token.
    ///
    /// Accepts a bare array, `{"results": [...]}` or `{"projects": [...]}`.
    /// Any other shape is logged as a warning and yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself fails.
    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        let body = self.transport.get("/projects").await?;

        match serde_json::from_value::<ProjectsEnvelope>(body) {
            Ok(envelope) => match envelope.into_projects() {
                Some(projects) => Ok(projects),
                None => {
                    warn!("Unexpected projects API response format");
                    Ok(Vec::new())
                }
            },
            Err(e) => {
                warn!(error = %e, "Unexpected projects API response format");
                Ok(Vec::new())
            }
        }
    }

    /// Fetch a single project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (including upstream 404).
    pub async fn get_project(&self, project_id: u64) -> Result<Project> {
        let body = self.transport.get(&format!("/projects/{project_id}")).await?;
        decode(body)
    }

    /// List faults of a project, filtered by `params` (e.g. `q`, `limit`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a fault cannot be decoded.
    pub async fn get_faults(&self, project_id: u64, params: &QueryParams) -> Result<Vec<Fault>> {
        let path = with_query(&format!("/projects/{project_id}/faults"), params);
        let body = self.transport.get(&path).await?;
        decode_results(body)
    }

    /// Fetch a single fault.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (including upstream 404).
    pub async fn get_fault(&self, project_id: u64, fault_id: u64) -> Result<Fault> {
        let body = self
            .transport
            .get(&format!("/projects/{project_id}/faults/{fault_id}"))
            .await?;
        decode(body)
    }

    /// List notices of a fault, filtered by `params` (e.g. `limit`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a notice cannot be decoded.
    pub async fn get_notices(
        &self,
        project_id: u64,
        fault_id: u64,
        params: &QueryParams,
    ) -> Result<Vec<Notice>> {
        let path = with_query(
            &format!("/projects/{project_id}/faults/{fault_id}/notices"),
            params,
        );
        let body = self.transport.get(&path).await?;
        decode_results(body)
    }

    /// Occurrence counts per affected user for a fault, in upstream order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    pub async fn get_affected_users(
        &self,
        project_id: u64,
        fault_id: u64,
    ) -> Result<Vec<AffectedUser>> {
        let body = self
            .transport
            .get(&format!(
                "/projects/{project_id}/faults/{fault_id}/affected_users"
            ))
            .await?;
        decode(body)
    }
}

/// Decode a record, mapping an empty object (a 204 body) to its default.
fn decode<T: DeserializeOwned + Default>(body: Value) -> Result<T> {
    if body.as_object().is_some_and(serde_json::Map::is_empty) {
        debug!("Empty response body, using default record");
        return Ok(T::default());
    }
    Ok(serde_json::from_value(body)?)
}

/// Unwrap a `{"results": [...]}` envelope; a missing or null `results` is empty.
fn decode_results<T: DeserializeOwned>(body: Value) -> Result<Vec<T>> {
    match body {
        Value::Object(mut map) => match map.remove("results") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(results) => Ok(serde_json::from_value(results)?),
        },
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use serde_json::json;

    fn api_with(mock: &Arc<MockTransport>) -> HoneybadgerApi {
        HoneybadgerApi::new(Arc::clone(mock) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn test_get_projects_unrecognized_shape_is_empty() {
        let mock = Arc::new(MockTransport::new().respond("/projects", json!({"data": []})));
        let projects = api_with(&mock).get_projects().await.unwrap();
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_get_projects_propagates_upstream_error() {
        let mock = Arc::new(MockTransport::new().fail("/projects", 401, "Unauthorized"));
        let err = api_with(&mock).get_projects().await.unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_get_faults_builds_query_and_unwraps_results() {
        let mock = Arc::new(MockTransport::new().respond(
            "/projects/7/faults?limit=5&q=is%3Aunresolved",
            json!({"results": [{"id": 1, "project_id": 7, "klass": "NoMethodError"}]}),
        ));
        let mut params = QueryParams::new();
        params.insert("q".into(), "is:unresolved".into());
        params.insert("limit".into(), "5".into());

        let faults = api_with(&mock).get_faults(7, &params).await.unwrap();
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].klass, "NoMethodError");
    }

    #[tokio::test]
    async fn test_get_faults_without_results_is_empty() {
        let mock = Arc::new(MockTransport::new().respond("/projects/7/faults", json!({})));
        let faults = api_with(&mock).get_faults(7, &QueryParams::new()).await.unwrap();
        assert!(faults.is_empty());
    }

    #[tokio::test]
    async fn test_empty_body_yields_default_records() {
        let mock = Arc::new(
            MockTransport::new()
                .respond("/projects/7", json!({}))
                .respond("/projects/7/faults/3", json!({}))
                .respond("/projects/7/faults/3/affected_users", json!({})),
        );
        let api = api_with(&mock);

        assert_eq!(api.get_project(7).await.unwrap(), Project::default());
        assert_eq!(api.get_fault(7, 3).await.unwrap(), Fault::default());
        assert!(api.get_affected_users(7, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_affected_users_keeps_order() {
        let mock = Arc::new(MockTransport::new().respond(
            "/projects/7/faults/3/affected_users",
            json!([
                {"user": "bob@example.com", "count": 9},
                {"user": "amy@example.com", "count": 2}
            ]),
        ));
        let users = api_with(&mock).get_affected_users(7, 3).await.unwrap();
        assert_eq!(
            users,
            vec![
                AffectedUser { user: "bob@example.com".into(), count: 9 },
                AffectedUser { user: "amy@example.com".into(), count: 2 },
            ]
        );
    }
}
