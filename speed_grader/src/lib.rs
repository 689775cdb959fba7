//! # SpeedGrader submissions query
//!
//! Typed client for the `SpeedGrader_SubmissionsByStudentsQuery` GraphQL operation:
//! given a course and a list of students, fetch the students' submission records.
//!
//! ## Key Concepts
//! - **Params**: [`params::SubmissionsByStudentsParams`], validated before any I/O.
//! - **Transport**: [`transport::GraphqlTransport`], the only seam that touches the network.
//! - **Fetcher**: [`fetcher::SubmissionsByStudentsFetcher`], which distinguishes a missing
//!   response path (`Ok(None)`) from an empty submission list (`Ok(Some(vec![]))`).

pub mod error;
pub mod fetcher;
pub mod params;
pub mod query;
pub mod response;
pub mod test_helpers;
pub mod transport;
pub mod types;

pub use error::{FetchError, FetchResult, TransportError};
pub use fetcher::{SubmissionsByStudentsFetcher, fetch_submissions_by_student_ids};
pub use params::SubmissionsByStudentsParams;
pub use query::SubmissionsQueryKey;
pub use transport::{GraphqlTransport, http::HttpTransport};
pub use types::{SubmissionRecord, SubmissionState};
