//! Tagbridge - Same-Origin Forwarding Shim
//!
//! Serves a server-side tag container (or any single upstream) under a
//! first-party path. Each inbound request has a configured prefix stripped
//! from its path, is re-addressed to the upstream domain with the Host
//! header rewritten, and the upstream response is returned unmodified.
//!
//! ```text
//!     Client Request            ┌──────────┐    ┌───────────┐
//!     ─────────────────────────▶│   http   │───▶│  forward  │
//!        /xyz/gtm.js?id=1       │  server  │    │  rewrite  │
//!                               └──────────┘    └─────┬─────┘
//!                                                     │ ForwardSpec
//!                                                     ▼
//!     Client Response           ┌──────────┐    ┌───────────┐
//!     ◀─────────────────────────│ response │◀───│  forward  │─────▶ Upstream
//!        (verbatim)             │ passthru │    │  client   │       tag server
//!                               └──────────┘    └───────────┘
//! ```
//!
//! Cross-cutting concerns live in `config` (file + environment loading,
//! validation) and in the middleware stack wired by `http::server`
//! (request ids, tracing, timeouts).

pub mod config;
pub mod forward;
pub mod http;

pub use config::ShimConfig;
pub use http::HttpServer;
