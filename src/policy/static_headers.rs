//! Static security headers.
//!
//! Stamps every response with `X-Content-Type-Options: nosniff` (disable
//! MIME sniffing) and `X-XSS-Protection: 0` (the legacy filter introduces
//! its own vulnerabilities and is disabled deliberately).

use axum::http::{header, HeaderName, HeaderValue};

use crate::pipeline::{Interceptor, RequestContext, Verdict};

static NOSNIFF: HeaderValue = HeaderValue::from_static("nosniff");
static XSS_OFF: HeaderValue = HeaderValue::from_static("0");
static X_XSS_PROTECTION: HeaderName = HeaderName::from_static("x-xss-protection");

/// Non-blocking interceptor for the fixed header set.
#[derive(Debug, Default)]
pub struct StaticHeaders;

impl Interceptor for StaticHeaders {
    fn name(&self) -> &'static str {
        "static_headers"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        ctx.set_response_header(header::X_CONTENT_TYPE_OPTIONS, NOSNIFF.clone());
        ctx.set_response_header(X_XSS_PROTECTION.clone(), XSS_OFF.clone());
        Verdict::Continue
    }
}
