//! HTTP Strict Transport Security.
//!
//! Emits `Strict-Transport-Security` unconditionally on every response,
//! instructing clients to only reach this host over encrypted transport.

use axum::http::{header, HeaderValue};

use crate::config::HstsConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, RequestContext, Verdict};

/// Build the header value for an HSTS configuration.
pub fn header_value(config: &HstsConfig) -> String {
    let mut value = format!("max-age={}", config.max_age_secs);
    if config.include_subdomains {
        value.push_str("; includeSubDomains");
    }
    if config.preload {
        value.push_str("; preload");
    }
    value
}

/// Non-blocking HSTS interceptor. The header value is precomputed at
/// construction.
#[derive(Debug)]
pub struct Hsts {
    value: HeaderValue,
}

impl Hsts {
    pub fn new(config: &HstsConfig) -> Result<Self, ConfigError> {
        if config.max_age_secs == 0 {
            return Err(ConfigError::Malformed(
                "hsts max-age must be greater than zero".to_string(),
            ));
        }
        let value = HeaderValue::from_str(&header_value(config))
            .map_err(|e| ConfigError::Malformed(format!("hsts header value: {e}")))?;
        Ok(Self { value })
    }
}

impl Interceptor for Hsts {
    fn name(&self) -> &'static str {
        "hsts"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        ctx.set_response_header(header::STRICT_TRANSPORT_SECURITY, self.value.clone());
        Verdict::Continue
    }
}
