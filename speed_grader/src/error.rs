//! Error types for the submissions query.
//!
//! There are exactly two failure kinds. [`FetchError::Validation`] is raised before any
//! request leaves the process. [`FetchError::Transport`] covers everything that can go
//! wrong once the request is out, and is handed back to the caller as-is.
//!
//! A well-formed response that simply lacks the course or its submissions is *not* an
//! error, see [`crate::fetcher`].

use common::format_validation_errors;
use validator::ValidationErrors;

/// Result type for submission queries.
pub type FetchResult<T> = Result<T, FetchError>;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid query parameters: {}", format_validation_errors(.0))]
    Validation(ValidationErrors),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<ValidationErrors> for FetchError {
    fn from(errors: ValidationErrors) -> Self {
        FetchError::Validation(errors)
    }
}

impl FetchError {
    /// The validation errors, if this failure happened before any I/O.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            FetchError::Validation(errors) => Some(errors),
            FetchError::Transport(_) => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FetchError::Validation(_))
    }
}

/// A single entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct GraphqlErrorMessage {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
}

/// Failures of the outbound exchange with the GraphQL service.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GraphQL endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", join_messages(.0))]
    Graphql(Vec<GraphqlErrorMessage>),

    #[error("Malformed GraphQL response: {0}")]
    MalformedResponse(String),
}

fn join_messages(errors: &[GraphqlErrorMessage]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_validation_display_names_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "course_id",
            ValidationError::new("length").with_message("courseId must not be empty".into()),
        );
        let err = FetchError::from(errors);

        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid query parameters: course_id: courseId must not be empty"
        );
    }

    #[test]
    fn test_graphql_errors_display_joined() {
        let err = FetchError::from(TransportError::Graphql(vec![
            GraphqlErrorMessage {
                message: "not found".into(),
                path: None,
            },
            GraphqlErrorMessage {
                message: "forbidden".into(),
                path: None,
            },
        ]));

        assert!(!err.is_validation());
        assert!(err.validation_errors().is_none());
        assert_eq!(err.to_string(), "GraphQL errors: not found; forbidden");
    }
}
