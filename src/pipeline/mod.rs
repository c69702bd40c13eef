//! Interceptor pipeline.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → before pass (registration order; first Halt wins)
//!     → downstream handler (only if nothing halted)
//!     → commit pass (same order, header adjustment on the final response)
//!     → pending headers merged into the outgoing response
//! ```
//!
//! # Design Decisions
//! - Order is fixed at construction; no runtime reordering API
//! - Header-writing interceptors run before blocking ones so rejected
//!   responses still carry the baseline security headers
//! - A halt is final for the request; the commit pass is skipped because
//!   the chain is abandoned

pub mod context;
pub mod executor;
pub mod interceptor;

pub use context::RequestContext;
pub use executor::Pipeline;
pub use interceptor::{Interceptor, Rejection, Verdict};
