use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{GraphqlErrorMessage, TransportError};
use crate::query::GraphqlRequest;
use crate::transport::GraphqlTransport;

#[derive(Debug, Clone)]
enum Reply {
    Data(Value),
    Graphql(Vec<String>),
    Status(u16, String),
}

/// In-memory [`GraphqlTransport`] that answers every request with the same canned reply
/// and remembers what it was asked.
///
/// Use [`RecordingTransport::calls`] to assert how many requests reached the "network".
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<GraphqlRequest>>,
}

impl RecordingTransport {
    /// Replies with `data` as the GraphQL `data` object.
    pub fn with_data(data: Value) -> Self {
        Self::new(Reply::Data(data))
    }

    /// Replies with a GraphQL `errors` array carrying these messages.
    pub fn with_graphql_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Reply::Graphql(messages.into_iter().map(Into::into).collect()))
    }

    /// Replies as if the endpoint answered with a non-2xx status.
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self::new(Reply::Status(status, body.into()))
    }

    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().expect("request log poisoned").len()
    }

    pub fn requests(&self) -> Vec<GraphqlRequest> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

impl GraphqlTransport for RecordingTransport {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(request.clone());

        let reply = match &self.reply {
            Reply::Data(data) => Ok(data.clone()),
            Reply::Graphql(messages) => Err(TransportError::Graphql(
                messages
                    .iter()
                    .map(|message| GraphqlErrorMessage {
                        message: message.clone(),
                        path: None,
                    })
                    .collect(),
            )),
            Reply::Status(status, body) => Err(TransportError::Status {
                status: *status,
                body: body.clone(),
            }),
        };

        Box::pin(async move { reply })
    }
}
