use serde::Serialize;
use serde_json::Value;

use crate::params::SubmissionsByStudentsParams;

pub const OPERATION_NAME: &str = "SpeedGrader_SubmissionsByStudentsQuery";

/// Name under which the grading UI caches results of this query.
pub const QUERY_KEY_NAME: &str = "SubmissionsByStudentIds";

pub const QUERY: &str = r#"query SpeedGrader_SubmissionsByStudentsQuery($courseId: ID!, $studentIds: [ID!]!) {
  course(id: $courseId) {
    submissionsConnection(studentIds: $studentIds) {
      nodes {
        assignmentId
        id
        late
        score
        state
        submittedAt
        userId
      }
    }
  }
}
"#;

/// JSON body of a GraphQL-over-HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    pub fn submissions_by_students(params: &SubmissionsByStudentsParams) -> Self {
        Self {
            query: QUERY,
            operation_name: OPERATION_NAME,
            variables: params.to_variables(),
        }
    }
}

/// Cache key identifying one submissions query: a fixed name plus its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionsQueryKey {
    pub name: &'static str,
    pub params: SubmissionsByStudentsParams,
}

impl SubmissionsQueryKey {
    pub fn new(params: SubmissionsByStudentsParams) -> Self {
        Self {
            name: QUERY_KEY_NAME,
            params,
        }
    }
}

impl From<SubmissionsByStudentsParams> for SubmissionsQueryKey {
    fn from(params: SubmissionsByStudentsParams) -> Self {
        Self::new(params)
    }
}
