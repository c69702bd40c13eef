//! Blocking validators.
//!
//! # Data Flow
//! ```text
//! Incoming request (headers already stamped by the policy interceptors):
//!     → hostcheck.rs (target host against the allow-list)
//!     → fetchmetadata.rs (Sec-Fetch-* resource isolation)
//!     → xsrf.rs (double-submit token on state-changing methods)
//! ```
//!
//! # Design Decisions
//! - Fail closed on anything host-shaped: a request with no recognizable
//!   host never matches as a wildcard
//! - Fetch metadata fails open when the signals are absent (older
//!   clients); this is a documented compatibility tradeoff
//! - Rejection bodies are generic; which check fired is logged, not leaked

pub mod fetchmetadata;
pub mod hostcheck;
pub mod xsrf;

pub use fetchmetadata::FetchMetadata;
pub use hostcheck::HostCheck;
pub use xsrf::Xsrf;
