//! Typed shape of the `data` object returned by the submissions query.
//!
//! Every step of `course -> submissionsConnection -> nodes` is optional, so a response
//! with a null or missing step still decodes and [`SubmissionsByStudentsData::into_nodes`]
//! turns it into `None`. Only the nodes themselves are strict: a node that does not match
//! [`SubmissionRecord`] fails decoding.

use serde::Deserialize;
use serde_json::Value;

use crate::error::TransportError;
use crate::types::SubmissionRecord;

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionsByStudentsData {
    #[serde(default)]
    pub course: Option<CourseNode>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseNode {
    #[serde(default)]
    pub submissions_connection: Option<SubmissionsConnection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubmissionsConnection {
    #[serde(default)]
    pub nodes: Option<Vec<SubmissionRecord>>,
}

impl SubmissionsByStudentsData {
    /// Decodes a GraphQL `data` value. A null `data` decodes as an empty response.
    pub fn from_data(data: Value) -> Result<Self, TransportError> {
        if data.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(data).map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }

    /// The node list, or `None` when any step of the path is absent.
    pub fn into_nodes(self) -> Option<Vec<SubmissionRecord>> {
        self.course?.submissions_connection?.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes_of(data: Value) -> Option<Vec<SubmissionRecord>> {
        SubmissionsByStudentsData::from_data(data)
            .unwrap()
            .into_nodes()
    }

    #[test]
    fn test_missing_steps_are_absent() {
        assert!(nodes_of(json!(null)).is_none());
        assert!(nodes_of(json!({})).is_none());
        assert!(nodes_of(json!({"course": null})).is_none());
        assert!(nodes_of(json!({"course": {}})).is_none());
        assert!(nodes_of(json!({"course": {"submissionsConnection": null}})).is_none());
        assert!(nodes_of(json!({"course": {"submissionsConnection": {"nodes": null}}})).is_none());
    }

    #[test]
    fn test_empty_nodes_are_present() {
        let nodes = nodes_of(json!({"course": {"submissionsConnection": {"nodes": []}}}));
        assert_eq!(nodes, Some(vec![]));
    }

    #[test]
    fn test_malformed_node_is_transport_error() {
        let err = SubmissionsByStudentsData::from_data(json!({
            "course": {"submissionsConnection": {"nodes": [{"id": "11"}]}}
        }))
        .unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }

    #[test]
    fn test_non_object_data_is_transport_error() {
        let err = SubmissionsByStudentsData::from_data(json!("oops")).unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
    }
}
