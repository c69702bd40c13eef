//! Anti-framing policy.
//!
//! Two cooperating pieces: [`FramingHeaders`] restricts embedding to
//! same-origin on every response (`X-Frame-Options` for legacy browsers,
//! a CSP `frame-ancestors` value for current ones), and the optional
//! [`FramingIsolation`] check rejects cross-site framing attempts outright
//! for strict deployments instead of trusting the browser to enforce the
//! headers.

use axum::http::{header, HeaderName, HeaderValue};

use crate::config::FramingConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, Rejection, RequestContext, Verdict};

static SAMEORIGIN: HeaderValue = HeaderValue::from_static("SAMEORIGIN");
static FRAME_ANCESTORS_SELF: HeaderValue = HeaderValue::from_static("frame-ancestors 'self'");
static CSP_REPORT_ONLY: HeaderName =
    HeaderName::from_static("content-security-policy-report-only");
static SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");
static SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");

/// Non-blocking framing headers. Emits `X-Frame-Options: SAMEORIGIN` plus
/// a `frame-ancestors 'self'` policy value; when a report endpoint is
/// configured, a report-only companion policy is added as well.
#[derive(Debug)]
pub struct FramingHeaders {
    report_only: Option<HeaderValue>,
}

impl FramingHeaders {
    pub fn new(config: &FramingConfig) -> Result<Self, ConfigError> {
        let report_only = match &config.report_uri {
            Some(uri) => {
                url::Url::parse(uri)
                    .map_err(|e| ConfigError::Malformed(format!("framing report-uri: {e}")))?;
                let value = format!("frame-ancestors 'self'; report-uri {uri}");
                Some(
                    HeaderValue::from_str(&value)
                        .map_err(|e| ConfigError::Malformed(format!("framing report-uri: {e}")))?,
                )
            }
            None => None,
        };
        Ok(Self { report_only })
    }
}

impl Interceptor for FramingHeaders {
    fn name(&self) -> &'static str {
        "framing_headers"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        ctx.set_response_header(header::X_FRAME_OPTIONS, SAMEORIGIN.clone());
        ctx.append_response_header(
            header::CONTENT_SECURITY_POLICY,
            FRAME_ANCESTORS_SELF.clone(),
        );
        if let Some(report_only) = &self.report_only {
            ctx.append_response_header(CSP_REPORT_ONLY.clone(), report_only.clone());
        }
        Verdict::Continue
    }
}

/// Blocking framing-isolation check for strict deployments.
///
/// Rejects requests that fetch metadata identifies as cross-site loads of
/// an embeddable destination. Requests without the signals pass; the
/// response headers from [`FramingHeaders`] remain the enforcement
/// backstop for older clients.
#[derive(Debug, Default)]
pub struct FramingIsolation;

const EMBED_DESTS: &[&str] = &["frame", "iframe", "embed", "object"];

impl Interceptor for FramingIsolation {
    fn name(&self) -> &'static str {
        "framing_isolation"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        let site = match ctx.header_str(&SEC_FETCH_SITE) {
            Some(site) => site.to_ascii_lowercase(),
            None => return Verdict::Continue,
        };
        if matches!(site.as_str(), "same-origin" | "none") {
            return Verdict::Continue;
        }

        let dest = ctx
            .header_str(&SEC_FETCH_DEST)
            .map(|d| d.to_ascii_lowercase())
            .unwrap_or_default();
        if EMBED_DESTS.contains(&dest.as_str()) {
            return Verdict::Halt(Rejection::forbidden());
        }
        Verdict::Continue
    }
}
