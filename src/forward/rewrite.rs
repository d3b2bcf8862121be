//! Pure request rewriting: path prefix stripping, target URL construction,
//! and Host header substitution. No I/O happens here.

use axum::http::{header, request::Parts, HeaderMap, HeaderValue, Method};

use crate::config::{UpstreamConfig, ValidationError};

/// Headers scoped to a single connection (RFC 9110 §7.6.1). Each hop's HTTP
/// stack owns these; forwarding them verbatim would corrupt framing.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Remove connection-scoped headers before re-framing on the next hop.
pub fn strip_connection_headers(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// The upstream destination, resolved once from validated configuration.
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    pub scheme: String,
    pub authority: String,
    pub path_prefix: String,
    /// Precomputed Host value so per-request construction cannot fail.
    pub host: HeaderValue,
}

impl UpstreamTarget {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ValidationError> {
        let host = HeaderValue::from_str(&config.domain)
            .map_err(|_| ValidationError::DomainNotAHost(config.domain.clone()))?;

        Ok(Self {
            scheme: config.scheme.clone(),
            authority: config.domain.clone(),
            path_prefix: config.path_prefix.clone(),
            host,
        })
    }

    /// Absolute URL for a rewritten path, preserving the query verbatim.
    pub fn url_for(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) => format!("{}://{}{}?{}", self.scheme, self.authority, path, query),
            None => format!("{}://{}{}", self.scheme, self.authority, path),
        }
    }
}

/// Strip the first literal occurrence of `prefix` from `path`, substituting
/// `/` in its place. The substitution never doubles the slash at the seam:
/// `/xyz/gtm.js` with prefix `/xyz` becomes `/gtm.js`, while `/xyzzy`
/// becomes `/zy`. An absent or empty prefix leaves the path unchanged.
pub fn rewrite_path(path: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    match path.find(prefix) {
        Some(start) => {
            let head = &path[..start];
            let tail = &path[start + prefix.len()..];
            if tail.starts_with('/') {
                format!("{}{}", head, tail)
            } else {
                format!("{}/{}", head, tail)
            }
        }
        None => path.to_string(),
    }
}

/// Everything the network step needs to issue the outbound request,
/// derived from the inbound request by URL and Host substitution.
#[derive(Debug)]
pub struct ForwardSpec {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    /// Whether the inbound request declared a body. Bodyless methods must
    /// not be sent with a streaming (chunked) body.
    pub has_body: bool,
}

impl ForwardSpec {
    pub fn from_parts(parts: &Parts, target: &UpstreamTarget) -> Self {
        let path = rewrite_path(parts.uri.path(), &target.path_prefix);
        let url = target.url_for(&path, parts.uri.query());

        let has_body = parts.headers.contains_key(header::CONTENT_LENGTH)
            || parts.headers.contains_key(header::TRANSFER_ENCODING);

        let mut headers = parts.headers.clone();
        strip_connection_headers(&mut headers);
        headers.insert(header::HOST, target.host.clone());

        Self {
            method: parts.method.clone(),
            url,
            headers,
            has_body,
        }
    }
}
