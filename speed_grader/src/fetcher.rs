//! # Submissions by students
//!
//! Fetches the submissions a set of students have in one course.
//!
//! 1. Parameters are validated. On failure the call returns [`FetchError::Validation`]
//!    and nothing is sent.
//! 2. Exactly one request goes to the [`GraphqlTransport`]. Its errors come back as
//!    [`FetchError::Transport`] without reinterpretation.
//! 3. The `data` object is decoded and `course.submissionsConnection.nodes` extracted.
//!    `Ok(None)` means a step of that path was missing (e.g. the course was not found);
//!    `Ok(Some(vec![]))` means the path exists and holds no submissions.
//!
//! There is no caching, retry or pagination at this layer.

use serde_json::Value;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::error::{FetchError, FetchResult};
use crate::params::SubmissionsByStudentsParams;
use crate::query::{GraphqlRequest, SubmissionsQueryKey};
use crate::response::SubmissionsByStudentsData;
use crate::transport::GraphqlTransport;
use crate::types::SubmissionRecord;

/// Validates `params`, runs the submissions query once and extracts its node list.
pub async fn fetch_submissions_by_student_ids<T>(
    transport: &T,
    params: &SubmissionsByStudentsParams,
) -> FetchResult<Option<Vec<SubmissionRecord>>>
where
    T: GraphqlTransport + ?Sized,
{
    if let Err(errors) = params.validate() {
        warn!(course_id = %params.course_id, "rejected submissions query parameters");
        return Err(FetchError::Validation(errors));
    }

    let request = GraphqlRequest::submissions_by_students(params);
    debug!(
        course_id = %params.course_id,
        students = params.student_ids.len(),
        "fetching submissions by students"
    );

    let data = transport.execute(&request).await?;
    let nodes = SubmissionsByStudentsData::from_data(data)?.into_nodes();

    match &nodes {
        Some(records) => debug!(count = records.len(), "received submission nodes"),
        None => info!(
            course_id = %params.course_id,
            "submissions path missing from response"
        ),
    }

    Ok(nodes)
}

/// Holds a transport and runs submissions queries against it.
#[derive(Debug, Clone)]
pub struct SubmissionsByStudentsFetcher<T> {
    transport: T,
}

impl<T: GraphqlTransport> SubmissionsByStudentsFetcher<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn fetch<I, S>(
        &self,
        course_id: impl Into<String>,
        student_ids: I,
    ) -> FetchResult<Option<Vec<SubmissionRecord>>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params = SubmissionsByStudentsParams::new(course_id, student_ids);
        self.fetch_params(&params).await
    }

    pub async fn fetch_params(
        &self,
        params: &SubmissionsByStudentsParams,
    ) -> FetchResult<Option<Vec<SubmissionRecord>>> {
        fetch_submissions_by_student_ids(&self.transport, params).await
    }

    /// Same as [`Self::fetch_params`] with the parameters carried by a cache key.
    pub async fn fetch_key(
        &self,
        key: &SubmissionsQueryKey,
    ) -> FetchResult<Option<Vec<SubmissionRecord>>> {
        self.fetch_params(&key.params).await
    }

    /// Accepts an untyped `{courseId, studentIds}` object.
    pub async fn fetch_value(&self, params: &Value) -> FetchResult<Option<Vec<SubmissionRecord>>> {
        let params = SubmissionsByStudentsParams::parse(params)?;
        self.fetch_params(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::test_helpers::RecordingTransport;
    use crate::types::SubmissionState;
    use serde_json::json;

    fn graded_node() -> Value {
        json!({
            "assignmentId": "1",
            "id": "11",
            "late": false,
            "score": 10,
            "state": "graded",
            "submittedAt": "2024-01-01T00:00:00Z",
            "userId": "5"
        })
    }

    #[tokio::test]
    async fn test_returns_nodes_for_full_path() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({
            "course": {"submissionsConnection": {"nodes": [graded_node()]}}
        })));

        let nodes = fetcher.fetch("101", ["5", "9"]).await.unwrap().unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "11");
        assert_eq!(nodes[0].state, SubmissionState::Graded);
        assert_eq!(fetcher.transport().calls(), 1);

        let sent = &fetcher.transport().requests()[0];
        assert_eq!(sent.variables, json!({"courseId": "101", "studentIds": ["5", "9"]}));
    }

    #[tokio::test]
    async fn test_empty_course_id_sends_nothing() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({})));

        let err = fetcher.fetch("", ["5"]).await.unwrap_err();

        assert!(err.is_validation());
        assert!(err.validation_errors().unwrap().field_errors().contains_key("course_id"));
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_student_id_sends_nothing() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({})));

        let err = fetcher.fetch("101", ["5", ""]).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_null_course_is_absent() {
        let fetcher =
            SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({"course": null})));

        assert_eq!(fetcher.fetch("101", ["5"]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_empty_nodes_are_not_absent() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({
            "course": {"submissionsConnection": {"nodes": []}}
        })));

        assert_eq!(fetcher.fetch("101", ["5"]).await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_transport_error_passes_through() {
        let fetcher =
            SubmissionsByStudentsFetcher::new(RecordingTransport::with_status(503, "maintenance"));

        let err = fetcher.fetch("101", ["5"]).await.unwrap_err();

        match err {
            FetchError::Transport(TransportError::Status { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(fetcher.transport().calls(), 1);
    }

    #[tokio::test]
    async fn test_fetchers_share_one_transport() {
        let shared = std::sync::Arc::new(RecordingTransport::with_data(json!({
            "course": {"submissionsConnection": {"nodes": [graded_node()]}}
        })));
        let first = SubmissionsByStudentsFetcher::new(shared.clone());
        let second = SubmissionsByStudentsFetcher::new(shared.clone());

        let a = first.fetch("101", ["5"]).await.unwrap();
        let b = second.fetch("101", ["9"]).await.unwrap();

        assert_eq!(a, b);
        assert_eq!(shared.calls(), 2);
        assert_eq!(
            shared.requests()[1].variables,
            json!({"courseId": "101", "studentIds": ["9"]})
        );
    }

    #[tokio::test]
    async fn test_fetch_value_rejects_missing_fields() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({})));

        let err = fetcher
            .fetch_value(&json!({"studentIds": ["5"]}))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(fetcher.transport().calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_key_uses_key_params() {
        let fetcher = SubmissionsByStudentsFetcher::new(RecordingTransport::with_data(json!({
            "course": {"submissionsConnection": {"nodes": []}}
        })));
        let key = SubmissionsQueryKey::new(SubmissionsByStudentsParams::new("202", ["7"]));

        fetcher.fetch_key(&key).await.unwrap();

        assert_eq!(
            fetcher.transport().requests()[0].variables,
            json!({"courseId": "202", "studentIds": ["7"]})
        );
    }
}
