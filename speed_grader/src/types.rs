use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Workflow state of a submission as reported by the GraphQL service.
///
/// The service owns the enumeration. Values this crate does not know about are kept in
/// [`SubmissionState::Other`] so a record survives a serialize round trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionState {
    Submitted,
    Unsubmitted,
    PendingReview,
    Graded,
    Ungraded,
    Deleted,
    Other(String),
}

impl SubmissionState {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionState::Submitted => "submitted",
            SubmissionState::Unsubmitted => "unsubmitted",
            SubmissionState::PendingReview => "pending_review",
            SubmissionState::Graded => "graded",
            SubmissionState::Ungraded => "ungraded",
            SubmissionState::Deleted => "deleted",
            SubmissionState::Other(raw) => raw,
        }
    }
}

impl From<String> for SubmissionState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "submitted" => SubmissionState::Submitted,
            "unsubmitted" => SubmissionState::Unsubmitted,
            "pending_review" => SubmissionState::PendingReview,
            "graded" => SubmissionState::Graded,
            "ungraded" => SubmissionState::Ungraded,
            "deleted" => SubmissionState::Deleted,
            _ => SubmissionState::Other(raw),
        }
    }
}

impl From<SubmissionState> for String {
    fn from(state: SubmissionState) -> Self {
        match state {
            SubmissionState::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RFC 3339 timestamp that keeps the exact text the service sent.
///
/// Decoding rejects strings that do not parse; encoding writes the original text back, so
/// offsets and fractional seconds are never normalised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    raw: String,
    parsed: DateTime<FixedOffset>,
}

impl Timestamp {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn to_datetime(&self) -> DateTime<FixedOffset> {
        self.parsed
    }
}

impl TryFrom<String> for Timestamp {
    type Error = chrono::ParseError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        let parsed = DateTime::parse_from_rfc3339(&raw)?;
        Ok(Self { raw, parsed })
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.raw
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One submission node of `course.submissionsConnection.nodes`.
///
/// Identifiers are GraphQL `ID`s and therefore strings on the wire. `score` stays a JSON
/// number so `10` is written back as `10`, not `10.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub assignment_id: String,
    pub id: String,
    pub late: bool,
    #[serde(default)]
    pub score: Option<Number>,
    pub state: SubmissionState,
    #[serde(default)]
    pub submitted_at: Option<Timestamp>,
    pub user_id: String,
}

impl SubmissionRecord {
    /// The score as a float, for arithmetic.
    pub fn score_f64(&self) -> Option<f64> {
        self.score.as_ref().and_then(Number::as_f64)
    }
}
