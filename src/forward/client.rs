//! Outbound network step: one HTTP call per inbound request.

use std::time::Duration;

use axum::body::Body;
use axum::http::Response;
use thiserror::Error;

use crate::config::TimeoutConfig;
use crate::forward::rewrite::{strip_connection_headers, ForwardSpec};

/// The single runtime error class: the outbound call failed.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

/// HTTP client handle for the upstream. Cheap to clone; shared across
/// handler invocations.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, ForwardError> {
        // Host rewriting is an HTTP/1.1 semantic; over h2 the header would
        // be superseded by :authority derived from the URL.
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .http1_only()
            .build()?;

        Ok(Self { http })
    }

    /// Issue the outbound request described by `spec`, streaming the inbound
    /// body out and the upstream response body back. No retries.
    pub async fn send(&self, spec: ForwardSpec, body: Body) -> Result<Response<Body>, ForwardError> {
        let mut request = self.http.request(spec.method, spec.url).headers(spec.headers);

        if spec.has_body {
            request = request.body(reqwest::Body::wrap_stream(body.into_data_stream()));
        }

        let upstream = request.send().await?;
        Ok(into_response(upstream))
    }
}

/// Rebuild the upstream response for the caller: status and end-to-end
/// headers verbatim, body streamed through.
fn into_response(upstream: reqwest::Response) -> Response<Body> {
    let status = upstream.status();
    let mut headers = upstream.headers().clone();
    strip_connection_headers(&mut headers);

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
