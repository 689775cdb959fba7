//! # GraphQL Transport
//!
//! The fetcher does not talk HTTP itself. It hands a [`GraphqlRequest`] to a
//! [`GraphqlTransport`] and gets back the `data` object of the response.
//!
//! - [`http::HttpTransport`]: posts the request as JSON with `reqwest`.
//! - [`crate::test_helpers::RecordingTransport`]: canned replies for tests.
//!
//! Implementations own everything below the query contract: timeouts, auth headers,
//! the GraphQL error envelope. They must not retry.

pub mod http;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::error::TransportError;
use crate::query::GraphqlRequest;

/// Executes one GraphQL request and yields its `data` value (`Value::Null` when the
/// service sent none).
pub trait GraphqlTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>>;
}

impl<T: GraphqlTransport + ?Sized> GraphqlTransport for Arc<T> {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>> {
        (**self).execute(request)
    }
}
