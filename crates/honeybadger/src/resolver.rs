//! Project lookup by numeric ID or display name.
//!
//! # Algorithm
//!
//! 1. If the input parses as an unsigned integer, try the cache under that ID,
//!    then `GET /projects/{id}`. A failed ID fetch, or one whose body is not
//!    the requested project (e.g. an empty 204 body), is logged and the lookup
//!    falls through to name search instead of failing.
//! 2. Lowercase the input and try the cache under the name key.
//! 3. Fetch the full project list, cache every project under both keys, and
//!    scan for a case-insensitive exact name match.
//!
//! Each project is cached under `id.to_string()` and `name.to_lowercase()`
//! in a single map. Entries live as long as the resolver and are never
//! invalidated, so renames upstream are not observed by a long-running
//! process.
//!
//! When several projects share a lowercased name, the last one in upstream
//! list order wins, both in the cache and in the scan. Upstream does not
//! document its list order, so callers should not rely on which duplicate is
//! returned.

use crate::api::HoneybadgerApi;
use crate::domain::Project;
use crate::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Resolves user-supplied project identifiers, caching what it learns.
pub struct ProjectResolver {
    api: Arc<HoneybadgerApi>,
    cache: RwLock<HashMap<String, Project>>,
}

impl ProjectResolver {
    /// Create a resolver with an empty cache.
    pub fn new(api: Arc<HoneybadgerApi>) -> Self {
        Self {
            api,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Find a project by numeric ID or case-insensitive exact name.
    ///
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error only if fetching the full project list fails.
    pub async fn find_project(&self, name_or_id: &str) -> Result<Option<Project>> {
        if let Ok(project_id) = name_or_id.trim().parse::<u64>() {
            if let Some(project) = self.cached(&project_id.to_string()).await {
                debug!(project_id, "Project cache hit by ID");
                return Ok(Some(project));
            }

            match self.api.get_project(project_id).await {
                Ok(project) if project.id == project_id => {
                    self.cache.write().await.extend(cache_entries(&project));
                    return Ok(Some(project));
                }
                Ok(project) => {
                    error!(
                        project_id,
                        returned_id = project.id,
                        "Project lookup by ID returned a different project, searching by name"
                    );
                }
                Err(e) => {
                    error!(
                        project_id,
                        error = %e,
                        "Error fetching project by ID, searching by name"
                    );
                }
            }
        }

        let normalized = name_or_id.to_lowercase();
        if let Some(project) = self.cached(&normalized).await {
            debug!(name = %normalized, "Project cache hit by name");
            return Ok(Some(project));
        }

        let projects = self.api.get_projects().await?;
        {
            let mut cache = self.cache.write().await;
            for project in &projects {
                cache.extend(cache_entries(project));
            }
        }

        Ok(projects
            .into_iter()
            .rev()
            .find(|p| p.name.to_lowercase() == normalized))
    }

    /// Number of cache keys (two per distinct project, fewer on collisions).
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn cached(&self, key: &str) -> Option<Project> {
        self.cache.read().await.get(key).cloned()
    }
}

fn cache_entries(project: &Project) -> [(String, Project); 2] {
    [
        (project.id.to_string(), project.clone()),
        (project.name.to_lowercase(), project.clone()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::transport::Transport;
    use rstest::rstest;
    use serde_json::json;

    fn resolver_with(mock: &Arc<MockTransport>) -> ProjectResolver {
        let api = HoneybadgerApi::new(Arc::clone(mock) as Arc<dyn Transport>);
        ProjectResolver::new(Arc::new(api))
    }

    fn projects_body() -> serde_json::Value {
        json!({"results": [
            {"id": 1, "name": "Storefront"},
            {"id": 2, "name": "Billing API"}
        ]})
    }

    #[rstest]
    #[case::exact("Billing API")]
    #[case::lower("billing api")]
    #[case::upper("BILLING API")]
    #[tokio::test]
    async fn test_id_and_name_resolve_to_same_project(#[case] name: &str) {
        let mock = Arc::new(
            MockTransport::new()
                .respond("/projects/2", json!({"id": 2, "name": "Billing API"}))
                .respond("/projects", projects_body()),
        );
        let resolver = resolver_with(&mock);

        let by_id = resolver.find_project("2").await.unwrap().unwrap();
        let by_name = resolver.find_project(name).await.unwrap().unwrap();

        assert_eq!(by_id.id, 2);
        assert_eq!(by_name.id, 2);
        // The ID fetch cached the name key too.
        assert_eq!(mock.requests(), vec!["/projects/2"]);
    }

    #[tokio::test]
    async fn test_name_search_warms_cache_for_ids() {
        let mock = Arc::new(MockTransport::new().respond("/projects", projects_body()));
        let resolver = resolver_with(&mock);

        let found = resolver.find_project("storefront").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert_eq!(resolver.cache_len().await, 4);

        let by_id = resolver.find_project("2").await.unwrap().unwrap();
        assert_eq!(by_id.name, "Billing API");
        assert_eq!(mock.requests(), vec!["/projects"]);
    }

    #[tokio::test]
    async fn test_non_numeric_input_never_requests_by_id() {
        let mock = Arc::new(MockTransport::new().respond("/projects", projects_body()));
        let resolver = resolver_with(&mock);

        let found = resolver.find_project("Unknown").await.unwrap();
        assert!(found.is_none());
        assert_eq!(mock.requests(), vec!["/projects"]);
    }

    #[tokio::test]
    async fn test_unknown_numeric_id_falls_through_to_not_found() {
        let mock = Arc::new(MockTransport::new().respond("/projects", projects_body()));
        let resolver = resolver_with(&mock);

        let found = resolver.find_project("999").await.unwrap();
        assert!(found.is_none());
        assert_eq!(mock.requests(), vec!["/projects/999", "/projects"]);
    }

    #[tokio::test]
    async fn test_empty_id_response_is_not_a_match() {
        let mock = Arc::new(
            MockTransport::new()
                .respond("/projects/5", json!({}))
                .respond("/projects", json!([{"id": 5, "name": "Real"}])),
        );
        let resolver = resolver_with(&mock);

        assert!(resolver.find_project("5").await.unwrap().is_none());
        assert_eq!(mock.requests(), vec!["/projects/5", "/projects"]);
        // Only the listed project was cached, never a defaulted one.
        assert_eq!(resolver.cache_len().await, 2);

        let cached = resolver.find_project("5").await.unwrap().unwrap();
        assert_eq!(cached.id, 5);
        assert_eq!(cached.name, "Real");
        assert_eq!(mock.request_count("/projects/5"), 1);
    }

    #[tokio::test]
    async fn test_numeric_name_matches_after_id_lookup_fails() {
        let mock = Arc::new(MockTransport::new().respond(
            "/projects",
            json!([{"id": 5, "name": "130943"}, {"id": 6, "name": "Other"}]),
        ));
        let resolver = resolver_with(&mock);

        let found = resolver.find_project("130943").await.unwrap().unwrap();
        assert_eq!(found.id, 5);
        assert_eq!(mock.requests(), vec!["/projects/130943", "/projects"]);
    }

    #[tokio::test]
    async fn test_duplicate_names_resolve_to_last_match() {
        let mock = Arc::new(MockTransport::new().respond(
            "/projects",
            json!([{"id": 10, "name": "Prod"}, {"id": 11, "name": "PROD"}]),
        ));
        let resolver = resolver_with(&mock);

        let scanned = resolver.find_project("prod").await.unwrap().unwrap();
        assert_eq!(scanned.id, 11);

        let cached = resolver.find_project("Prod").await.unwrap().unwrap();
        assert_eq!(cached.id, 11);
        assert_eq!(mock.request_count("/projects"), 1);
    }

    #[tokio::test]
    async fn test_list_failure_propagates() {
        let mock = Arc::new(MockTransport::new().fail("/projects", 500, "boom"));
        let resolver = resolver_with(&mock);

        let err = resolver.find_project("storefront").await.unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_unrecognized_list_shape_is_not_found() {
        let mock = Arc::new(MockTransport::new().respond("/projects", json!({"data": []})));
        let resolver = resolver_with(&mock);

        assert!(resolver.find_project("storefront").await.unwrap().is_none());
    }
}
