//! Header-writing policies.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → static_headers.rs (nosniff, XSS filter off)
//!     → hsts.rs (transport pinning)
//!     → coop.rs (opener isolation)
//!     → csp.rs (per-request nonce policy)
//!     → framing.rs (embedding restrictions, optional strict blocking)
//! ```
//!
//! # Design Decisions
//! - Each policy has a pure `config → header value` builder; the
//!   interceptor around it only writes pending headers
//! - Values are precomputed at construction wherever they don't depend on
//!   the request (CSP's nonce is the exception)
//! - These never halt the chain; their only failure mode is a
//!   construction-time configuration error

pub mod coop;
pub mod csp;
pub mod framing;
pub mod hsts;
pub mod static_headers;

pub use coop::Coop;
pub use csp::Csp;
pub use framing::{FramingHeaders, FramingIsolation};
pub use hsts::Hsts;
pub use static_headers::StaticHeaders;
