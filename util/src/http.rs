use reqwest::{Client, redirect};
use std::time::Duration;

/// Builds the shared HTTP client used for outbound GraphQL calls.
///
///  - `timeout_secs` caps each whole request; `0` disables the cap.
///  - Redirects are followed at most 5 times.
pub fn build_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(concat!("speedgrader-query/", env!("CARGO_PKG_VERSION")))
        .redirect(redirect::Policy::limited(5));

    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }

    let client = builder.build()?;
    tracing::debug!(timeout_secs, "built GraphQL HTTP client");
    Ok(client)
}
