//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request parts
//!     → rewrite.rs (pure: strip prefix, build target URL, force Host)
//!     → ForwardSpec
//!     → client.rs (network: send outbound request, stream response back)
//!     → upstream response, returned verbatim
//! ```
//!
//! # Design Decisions
//! - The rewrite step is a pure function so it is testable without I/O
//! - One outbound call per inbound call; no retries, no caching
//! - A failed outbound call is the only runtime error class

pub mod client;
pub mod rewrite;

pub use client::{ForwardError, UpstreamClient};
pub use rewrite::{rewrite_path, ForwardSpec, UpstreamTarget};
