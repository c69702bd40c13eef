//! Cross-Origin-Opener-Policy.
//!
//! Isolates the page's browsing context from cross-origin openers. The
//! default is `same-origin`; a reporting group can be attached for
//! deployments that collect violation reports.

use axum::http::{HeaderName, HeaderValue};

use crate::config::CoopConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, RequestContext, Verdict};

static CROSS_ORIGIN_OPENER_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-opener-policy");

/// Build the header value for a COOP configuration.
pub fn header_value(config: &CoopConfig) -> String {
    match &config.report_group {
        Some(group) => format!("{}; report-to=\"{}\"", config.policy.as_str(), group),
        None => config.policy.as_str().to_string(),
    }
}

/// Non-blocking COOP interceptor.
#[derive(Debug)]
pub struct Coop {
    value: HeaderValue,
}

impl Coop {
    pub fn new(config: &CoopConfig) -> Result<Self, ConfigError> {
        let value = HeaderValue::from_str(&header_value(config))
            .map_err(|e| ConfigError::Malformed(format!("coop header value: {e}")))?;
        Ok(Self { value })
    }
}

impl Interceptor for Coop {
    fn name(&self) -> &'static str {
        "coop"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        ctx.set_response_header(CROSS_ORIGIN_OPENER_POLICY.clone(), self.value.clone());
        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoopPolicy;

    #[test]
    fn test_default_is_same_origin() {
        assert_eq!(header_value(&CoopConfig::default()), "same-origin");
    }

    #[test]
    fn test_report_group_appended() {
        let config = CoopConfig {
            policy: CoopPolicy::SameOrigin,
            report_group: Some("coop-violations".to_string()),
        };
        assert_eq!(
            header_value(&config),
            "same-origin; report-to=\"coop-violations\""
        );
    }

    #[test]
    fn test_unset_group_omitted_not_empty() {
        let config = CoopConfig {
            policy: CoopPolicy::UnsafeNone,
            report_group: None,
        };
        assert_eq!(header_value(&config), "unsafe-none");
    }
}
