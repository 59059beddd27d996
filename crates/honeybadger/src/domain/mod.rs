//! Domain records returned by the Honeybadger API.
//!
//! Every record is an immutable snapshot of upstream state. Fields the client
//! does not model explicitly are kept in a flattened `extra` map so nothing
//! the upstream sends is lost.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A Honeybadger project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Upstream-assigned numeric ID, the canonical key.
    pub id: u64,

    /// Display name. Not guaranteed unique.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    /// Total number of faults.
    #[serde(default, deserialize_with = "nullable")]
    pub fault_count: u64,

    /// Number of unresolved faults.
    #[serde(default, deserialize_with = "nullable")]
    pub unresolved_fault_count: u64,

    /// Environment names reported to this project.
    #[serde(default, deserialize_with = "environment_names")]
    pub environments: Vec<String>,

    /// Project API key.
    #[serde(default, deserialize_with = "nullable")]
    pub token: String,

    /// Whether the project is active.
    #[serde(default, deserialize_with = "nullable")]
    pub active: bool,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Timestamp of the first notice ever received.
    #[serde(default)]
    pub earliest_notice_at: Option<String>,

    /// Timestamp of the most recent notice.
    #[serde(default)]
    pub last_notice_at: Option<String>,

    /// Project owner, if reported.
    #[serde(default)]
    pub owner: Option<Owner>,

    /// Teams with access to the project.
    #[serde(default, deserialize_with = "nullable")]
    pub teams: Vec<Team>,

    /// Upstream fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Owner of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Owner ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Owner display name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Owner email address.
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

/// A team with access to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Team ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// Team name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

/// A fault: a group of notices sharing an error class and location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// Fault ID, scoped to `project_id`.
    pub id: u64,

    /// Owning project.
    #[serde(default, deserialize_with = "nullable")]
    pub project_id: u64,

    /// Exception class name.
    #[serde(default, deserialize_with = "nullable")]
    pub klass: String,

    /// Error message.
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,

    /// Component (controller, job class) where the fault occurred.
    #[serde(default)]
    pub component: Option<String>,

    /// Environment the fault was reported from.
    #[serde(default)]
    pub environment: Option<String>,

    /// Whether the fault has been resolved.
    #[serde(default, deserialize_with = "nullable")]
    pub resolved: bool,

    /// Whether the fault is ignored.
    #[serde(default, deserialize_with = "nullable")]
    pub ignored: bool,

    /// Number of occurrences.
    #[serde(default, deserialize_with = "nullable")]
    pub notices_count: u64,

    /// First-seen timestamp (ISO 8601).
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,

    /// Last-seen timestamp (ISO 8601).
    #[serde(default, deserialize_with = "nullable")]
    pub last_notice_at: String,

    /// User the fault is assigned to.
    #[serde(default)]
    pub assignee: Option<Assignee>,

    /// Tags attached to the fault.
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Vec<String>,

    /// Link to the fault in the Honeybadger UI.
    #[serde(default)]
    pub url: Option<String>,

    /// Upstream fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The user a fault is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    /// User ID.
    #[serde(default)]
    pub id: Option<u64>,
    /// User display name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// User email address.
    #[serde(default, deserialize_with = "nullable")]
    pub email: String,
}

/// One occurrence of a fault.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    /// Opaque notice ID.
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    /// The fault this notice belongs to.
    #[serde(default)]
    pub fault_id: Option<u64>,

    /// Error message of this occurrence.
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,

    /// Timestamp (ISO 8601).
    #[serde(default, deserialize_with = "nullable")]
    pub created_at: String,

    /// Request context, when the error happened inside a request.
    #[serde(default)]
    pub request: Option<NoticeRequest>,

    /// Backtrace frames, innermost first, in upstream order.
    #[serde(default, deserialize_with = "nullable")]
    pub backtrace: Vec<BacktraceFrame>,

    /// Upstream fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request context attached to a notice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoticeRequest {
    /// Request URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Component (e.g. controller) handling the request.
    #[serde(default)]
    pub component: Option<String>,
    /// Action within the component.
    #[serde(default)]
    pub action: Option<String>,
    /// Request parameters.
    #[serde(default)]
    pub params: Option<Value>,
    /// Session data.
    #[serde(default)]
    pub session: Option<Value>,
    /// Custom context.
    #[serde(default)]
    pub context: Option<Value>,
    /// Upstream fields not modelled above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single backtrace frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacktraceFrame {
    /// Source file.
    #[serde(default, deserialize_with = "nullable")]
    pub file: String,
    /// Line number, as sent by upstream.
    #[serde(default, deserialize_with = "string_or_number")]
    pub number: String,
    /// Method or function name.
    #[serde(default, deserialize_with = "nullable")]
    pub method: String,
}

/// Occurrence count of a fault for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectedUser {
    /// User identifier.
    #[serde(default, deserialize_with = "string_or_number")]
    pub user: String,
    /// Number of occurrences for this user.
    #[serde(default, deserialize_with = "nullable")]
    pub count: u64,
}

/// The response shapes accepted from `GET /projects`.
///
/// Variants are tried in order; anything that matches none of the known
/// envelopes lands in [`ProjectsEnvelope::Unrecognized`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectsEnvelope {
    /// A bare array of projects.
    Bare(Vec<Project>),
    /// `{"results": [...]}`
    Results {
        /// Listed projects.
        results: Vec<Project>,
    },
    /// `{"projects": [...]}`
    Projects {
        /// Listed projects.
        projects: Vec<Project>,
    },
    /// Any other shape.
    Unrecognized(Value),
}

impl ProjectsEnvelope {
    /// Unwrap the project list, or `None` for an unrecognized shape.
    #[must_use]
    pub fn into_projects(self) -> Option<Vec<Project>> {
        match self {
            Self::Bare(projects)
            | Self::Results { results: projects }
            | Self::Projects { projects } => Some(projects),
            Self::Unrecognized(_) => None,
        }
    }
}

/// Parse a caller-supplied identifier as a numeric ID.
///
/// # Errors
///
/// Returns `Error::InvalidId` if `value` is not an unsigned integer.
pub fn parse_id(field: &'static str, value: &str) -> Result<u64> {
    value.trim().parse::<u64>().map_err(|_| Error::InvalidId {
        field,
        value: value.to_string(),
    })
}

/// Treat an explicit JSON `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept either a JSON string or a JSON number, keeping the textual form.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// Environments arrive either as plain names or as objects with a `name`.
fn environment_names<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Environment {
        Name(String),
        Object { name: String },
    }

    let entries = Option::<Vec<Environment>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .map(|env| match env {
            Environment::Name(name) | Environment::Object { name } => name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_project_keeps_unmodelled_fields() {
        let project: Project = serde_json::from_value(json!({
            "id": 7,
            "name": "Storefront",
            "fault_count": 12,
            "unresolved_fault_count": 3,
            "environments": ["production", "staging"],
            "token": "abc",
            "active": true,
            "disable_public_links": false
        }))
        .unwrap();

        assert_eq!(project.id, 7);
        assert_eq!(project.environments, vec!["production", "staging"]);
        assert_eq!(project.extra.get("disable_public_links"), Some(&json!(false)));
    }

    #[test]
    fn test_project_environment_objects_use_name() {
        let project: Project = serde_json::from_value(json!({
            "id": 1,
            "name": "Api",
            "environments": [{"id": 3, "name": "production"}, {"id": 4, "name": "development"}]
        }))
        .unwrap();

        assert_eq!(project.environments, vec!["production", "development"]);
    }

    #[test]
    fn test_project_requires_id() {
        let result: std::result::Result<Project, _> =
            serde_json::from_value(json!({"name": "No id"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_fields_become_defaults() {
        let fault: Fault = serde_json::from_value(json!({
            "id": 99,
            "project_id": 7,
            "klass": "RuntimeError",
            "message": null,
            "tags": null,
            "notices_count": null
        }))
        .unwrap();

        assert_eq!(fault.message, "");
        assert!(fault.tags.is_empty());
        assert_eq!(fault.notices_count, 0);
    }

    #[test]
    fn test_backtrace_order_and_numeric_line_numbers() {
        let notice: Notice = serde_json::from_value(json!({
            "id": "a1b2",
            "created_at": "2024-01-01T00:00:00Z",
            "backtrace": [
                {"file": "app/models/user.rb", "number": "42", "method": "save"},
                {"file": "app/controllers/users_controller.rb", "number": 10, "method": "create"}
            ]
        }))
        .unwrap();

        let files: Vec<&str> = notice.backtrace.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(
            files,
            vec!["app/models/user.rb", "app/controllers/users_controller.rb"]
        );
        assert_eq!(notice.backtrace[1].number, "10");
    }

    #[rstest]
    #[case::bare(json!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]))]
    #[case::results(json!({"results": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}))]
    #[case::projects(json!({"projects": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]}))]
    fn test_projects_envelope_shapes(#[case] body: Value) {
        let envelope: ProjectsEnvelope = serde_json::from_value(body).unwrap();
        let ids: Vec<u64> = envelope
            .into_projects()
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[case::empty_object(json!({}))]
    #[case::string(json!("projects"))]
    #[case::results_not_array(json!({"results": "nope"}))]
    fn test_projects_envelope_unrecognized(#[case] body: Value) {
        let envelope: ProjectsEnvelope = serde_json::from_value(body).unwrap();
        assert!(envelope.into_projects().is_none());
    }

    #[rstest]
    #[case::plain("130943", Some(130_943))]
    #[case::padded(" 12 ", Some(12))]
    #[case::name("Storefront", None)]
    #[case::negative("-1", None)]
    #[case::empty("", None)]
    fn test_parse_id(#[case] input: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_id("project ID", input).ok(), expected);
    }
}
