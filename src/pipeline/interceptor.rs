//! The interceptor contract.
//!
//! # Design Decisions
//! - Rejections are values, not errors: a blocking interceptor's negative
//!   decision is ordinary control flow
//! - Rejection bodies stay generic so a client cannot tell which policy
//!   fired (the policy name goes to logs and metrics only)
//! - Interceptors are shared read-only across all in-flight requests; any
//!   internal state must be immutable after construction

use axum::http::response::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Response, StatusCode};

use crate::pipeline::context::RequestContext;

/// Outcome of an interceptor's `before` phase.
#[derive(Debug)]
pub enum Verdict {
    /// Proceed to the next interceptor (and eventually the handler).
    Continue,

    /// Stop the chain and answer with this rejection.
    Halt(Rejection),
}

/// Terminal response produced by a halting interceptor.
///
/// Carries a status code, optional extra headers, and a minimal generic
/// body. It propagates unchanged to the client; the downstream handler and
/// all later interceptors never run.
#[derive(Debug)]
pub struct Rejection {
    status: StatusCode,
    headers: HeaderMap,
    body: &'static str,
}

impl Rejection {
    /// Forbidden with a generic body.
    pub fn forbidden() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            headers: HeaderMap::new(),
            body: "Forbidden",
        }
    }

    /// Not Found with a generic body. Used where confirming the resource
    /// or host exists would itself leak information.
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            body: "Not Found",
        }
    }

    /// Bad Request with a generic body.
    pub fn bad_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            headers: HeaderMap::new(),
            body: "Bad Request",
        }
    }

    /// Attach an extra response header to the rejection.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Build the outgoing response, layering the pipeline's pending
    /// headers over the rejection's own.
    pub fn into_response<B: From<String>>(self, pending: &HeaderMap) -> Response<B> {
        let mut response = Response::new(B::from(self.body.to_string()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        merge_headers(response.headers_mut(), pending);
        response
    }
}

/// Merge `pending` into `target`. Pipeline-owned names overwrite anything
/// already present for the same name; multi-valued names keep every value.
pub(crate) fn merge_headers(target: &mut HeaderMap, pending: &HeaderMap) {
    for name in pending.keys() {
        target.remove(name);
        for value in pending.get_all(name) {
            target.append(name.clone(), value.clone());
        }
    }
}

/// A unit in the pipeline.
///
/// Implementors are registered once at startup and shared across all
/// requests; `before` may mutate only the request's pending response state.
pub trait Interceptor: Send + Sync {
    /// Stable name for logs and metrics. Never exposed to clients.
    fn name(&self) -> &'static str;

    /// Inspect the request before the handler runs. Returning
    /// [`Verdict::Halt`] abandons the chain.
    fn before(&self, ctx: &mut RequestContext) -> Verdict;

    /// Adjust the final response after the handler ran. Only runs when no
    /// interceptor halted.
    fn commit(&self, _ctx: &RequestContext, _response: &mut Parts) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_rejection_carries_pending_headers() {
        let mut pending = HeaderMap::new();
        pending.append(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );

        let response: Response<String> = Rejection::forbidden().into_response(&pending);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(response
            .headers()
            .contains_key(header::STRICT_TRANSPORT_SECURITY));
        assert_eq!(response.body(), "Forbidden");
    }

    #[test]
    fn test_merge_overwrites_same_name_keeps_multivalue() {
        let mut target = HeaderMap::new();
        target.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src *"),
        );

        let mut pending = HeaderMap::new();
        pending.append(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("object-src 'none'"),
        );
        pending.append(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("frame-ancestors 'self'"),
        );

        merge_headers(&mut target, &pending);

        let values: Vec<_> = target
            .get_all(header::CONTENT_SECURITY_POLICY)
            .iter()
            .collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], "object-src 'none'");
    }
}
