//! Chain executor.
//!
//! # Responsibilities
//! - Run the `before` pass in registration order, stopping at the first
//!   halt
//! - Invoke the downstream handler exactly once per non-halted request
//! - Run the `commit` pass in the same order over the final response
//! - Merge the pending header set into every outgoing response, rejections
//!   included
//!
//! # Design Decisions
//! - Strictly sequential execution: later interceptors may depend on state
//!   set by earlier ones, so ordering is semantically load-bearing
//! - Interceptors are presumed deterministic pure functions of
//!   (request, config); an internal panic is a programming error and is
//!   not caught here

use axum::http::response::Parts;
use axum::http::Response;

use crate::observability;
use crate::pipeline::context::RequestContext;
use crate::pipeline::interceptor::{merge_headers, Interceptor, Rejection, Verdict};

/// An ordered, immutable sequence of interceptors.
pub struct Pipeline {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl Pipeline {
    /// Fix the interceptor order. There is deliberately no API to reorder
    /// or insert afterwards.
    pub fn new(interceptors: Vec<Box<dyn Interceptor>>) -> Self {
        Self { interceptors }
    }

    /// Registered interceptor names, in execution order.
    pub fn interceptor_names(&self) -> Vec<&'static str> {
        self.interceptors.iter().map(|i| i.name()).collect()
    }

    /// Run the `before` pass. Returns the first rejection, or `None` when
    /// every interceptor continued.
    pub fn before(&self, ctx: &mut RequestContext) -> Option<Rejection> {
        for interceptor in &self.interceptors {
            match interceptor.before(ctx) {
                Verdict::Continue => {}
                Verdict::Halt(rejection) => {
                    tracing::warn!(
                        policy = interceptor.name(),
                        host = ctx.host().as_deref(),
                        method = %ctx.method(),
                        status = %rejection.status(),
                        "request rejected"
                    );
                    observability::record_rejection(interceptor.name());
                    return Some(rejection);
                }
            }
        }
        None
    }

    /// Run the `commit` pass over a handler response and merge the pending
    /// headers into it.
    pub fn commit(&self, ctx: &RequestContext, parts: &mut Parts) {
        for interceptor in &self.interceptors {
            interceptor.commit(ctx, parts);
        }
        merge_headers(&mut parts.headers, ctx.pending_headers());
    }

    /// Execute the full chain against one request.
    ///
    /// The handler is invoked exactly once when nothing halts; a halt
    /// returns the rejection directly, still carrying every pending header
    /// written before the halting interceptor ran.
    pub fn run<B, F>(&self, mut ctx: RequestContext, handler: F) -> Response<B>
    where
        B: From<String>,
        F: FnOnce(&RequestContext) -> Response<B>,
    {
        if let Some(rejection) = self.before(&mut ctx) {
            return rejection.into_response(ctx.pending_headers());
        }

        let response = handler(&ctx);
        let (mut parts, body) = response.into_parts();
        self.commit(&ctx, &mut parts);
        observability::record_pass();
        Response::from_parts(parts, body)
    }
}
