//! Homepage keyword probe.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::probe::contains_cc_keyword;

/// Request timeout for homepage fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures while probing a project homepage.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildFailed(String),

    /// The request did not complete.
    #[error("Homepage request failed: {0}")]
    RequestFailed(String),

    /// The server answered with a non-success status.
    #[error("Homepage returned HTTP status {0}")]
    HttpStatus(u16),
}

/// Builds the HTTP client the probe uses: short timeout, identifiable agent.
pub fn default_client() -> Result<reqwest::Client, ProbeError> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent(concat!("cc-scout/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| ProbeError::ClientBuildFailed(err.to_string()))
}

/// Fetches a project homepage and searches it for CC keywords.
pub async fn check_homepage(client: &reqwest::Client, url: &str) -> Result<bool, ProbeError> {
    debug!("Checking homepage {url} for CC indications");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|err| ProbeError::RequestFailed(err.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::HttpStatus(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|err| ProbeError::RequestFailed(err.to_string()))?;

    let found = contains_cc_keyword(&body);
    if found {
        info!("Found CC keyword on homepage {url}");
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn keyword_on_homepage_is_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body>We use Conventional Commits for all changes.</body></html>",
            ))
            .mount(&server)
            .await;

        let client = default_client().expect("client");
        let found = check_homepage(&client, &server.uri()).await.expect("probe");
        assert!(found);
    }

    #[tokio::test]
    async fn homepage_without_keyword_is_negative() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>A project homepage.</body></html>"),
            )
            .mount(&server)
            .await;

        let client = default_client().expect("client");
        let found = check_homepage(&client, &server.uri()).await.expect("probe");
        assert!(!found);
    }

    #[tokio::test]
    async fn http_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = default_client().expect("client");
        let result = check_homepage(&client, &server.uri()).await;
        assert!(matches!(result, Err(ProbeError::HttpStatus(404))));
    }
}
