use std::future::Future;
use std::pin::Pin;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};
use util::config;

use super::GraphqlTransport;
use crate::error::{GraphqlErrorMessage, TransportError};
use crate::query::GraphqlRequest;

/// Response envelope of a GraphQL-over-HTTP call.
#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphqlErrorMessage>>,
}

/// Posts GraphQL requests as JSON to a single endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds a transport from the global [`config::AppConfig`].
    pub fn from_config() -> Result<Self, TransportError> {
        let client = util::http::build_client(config::request_timeout_secs())?;
        let transport = Self::new(client, config::graphql_url());
        Ok(match config::api_token() {
            Some(token) => transport.with_token(token),
            None => transport,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: &GraphqlRequest) -> Result<Value, TransportError> {
        debug!(
            endpoint = %self.endpoint,
            operation = request.operation_name,
            "sending GraphQL request"
        );

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = describe_body(response.text().await);
            warn!(status = status.as_u16(), "GraphQL endpoint returned an error status");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let envelope: GraphqlEnvelope = serde_json::from_str(&text).map_err(|e| {
            TransportError::MalformedResponse(format!("{e}. Full response: {text}"))
        })?;

        if let Some(errors) = envelope.errors.filter(|errs| !errs.is_empty()) {
            warn!(count = errors.len(), "GraphQL response carried errors");
            return Err(TransportError::Graphql(errors));
        }

        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

/// Body text of an error response, or a note saying why it could not be read.
fn describe_body(body: Result<String, reqwest::Error>) -> String {
    match body {
        Ok(text) => text,
        Err(e) => format!("<unreadable body: {e}>"),
    }
}

impl GraphqlTransport for HttpTransport {
    fn execute<'a>(
        &'a self,
        request: &'a GraphqlRequest,
    ) -> Pin<Box<dyn Future<Output = Result<Value, TransportError>> + Send + 'a>> {
        Box::pin(self.send(request))
    }
}
