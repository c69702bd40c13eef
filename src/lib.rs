//! Security-hardening interceptor pipeline for HTTP services.
//!
//! A fixed, ordered chain of policy interceptors runs in front of an HTTP
//! application: header-writing interceptors stamp every response with
//! defensive headers (HSTS, CSP, COOP, anti-framing, nosniff), and blocking
//! interceptors reject requests that violate configured invariants (host
//! confusion, cross-origin resource loads, cross-site request forgery).
//!
//! The pipeline performs no network I/O. The hosting server owns the
//! transport and hands each request through [`pipeline::Pipeline::run`] or
//! the [`layer::ShieldLayer`] tower adapter.

pub mod config;
pub mod defaults;
pub mod error;
pub mod layer;
pub mod observability;
pub mod pipeline;
pub mod policy;
pub mod validators;

pub use config::PipelineConfig;
pub use error::ConfigError;
pub use layer::ShieldLayer;
pub use pipeline::{Interceptor, Pipeline, Rejection, RequestContext, Verdict};
