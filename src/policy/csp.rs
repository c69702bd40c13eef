//! Content Security Policy.
//!
//! # Responsibilities
//! - Generate a fresh nonce per request and expose it on the context so
//!   handlers can tag inline scripts
//! - Emit a strict nonce-based policy: scripts must carry the nonce,
//!   plugins are disabled, base-uri is locked down
//!
//! # Design Decisions
//! - `'unsafe-inline'` plus `'strict-dynamic'` is the standard compat
//!   ladder: browsers that understand nonces ignore `'unsafe-inline'`,
//!   older ones fall back to it
//! - The report-uri directive is omitted entirely when unset

use axum::http::{header, HeaderValue};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::config::CspConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, RequestContext, Verdict};

const NONCE_BYTES: usize = 20;

/// Generate a random base64 nonce for one request.
pub fn generate_nonce() -> String {
    BASE64.encode(rand::random::<[u8; NONCE_BYTES]>())
}

/// Serialize the strict policy for a given nonce.
pub fn serialize(config: &CspConfig, nonce: &str) -> String {
    let mut policy = format!(
        "object-src 'none'; script-src 'unsafe-inline' 'nonce-{nonce}' 'strict-dynamic' https: http:; base-uri 'none'"
    );
    if let Some(uri) = &config.report_uri {
        policy.push_str("; report-uri ");
        policy.push_str(uri);
    }
    policy
}

/// Non-blocking CSP interceptor.
#[derive(Debug)]
pub struct Csp {
    config: CspConfig,
}

impl Csp {
    pub fn new(config: &CspConfig) -> Result<Self, ConfigError> {
        if let Some(uri) = &config.report_uri {
            url::Url::parse(uri)
                .map_err(|e| ConfigError::Malformed(format!("csp report-uri: {e}")))?;
        }
        Ok(Self {
            config: config.clone(),
        })
    }
}

impl Interceptor for Csp {
    fn name(&self) -> &'static str {
        "csp"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        let nonce = generate_nonce();
        let policy = serialize(&self.config, &nonce);
        ctx.set_csp_nonce(nonce);
        match HeaderValue::from_str(&policy) {
            Ok(value) => {
                ctx.append_response_header(header::CONTENT_SECURITY_POLICY, value);
            }
            // Unreachable with a validated report-uri; the nonce is base64.
            Err(_) => {
                tracing::error!("generated CSP value is not a valid header");
            }
        }
        Verdict::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Method, Request};

    #[test]
    fn test_serialize_contains_nonce_and_lockdowns() {
        let policy = serialize(&CspConfig::default(), "abc123");
        assert!(policy.contains("'nonce-abc123'"));
        assert!(policy.contains("object-src 'none'"));
        assert!(policy.contains("base-uri 'none'"));
        assert!(!policy.contains("report-uri"));
    }

    #[test]
    fn test_report_uri_appended_when_set() {
        let config = CspConfig {
            report_uri: Some("https://example.com/csp".to_string()),
        };
        let policy = serialize(&config, "n");
        assert!(policy.ends_with("; report-uri https://example.com/csp"));
    }

    #[test]
    fn test_nonces_differ_between_requests() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn test_before_stores_nonce_on_context() {
        let csp = Csp::new(&CspConfig::default()).unwrap();
        let mut ctx = RequestContext::from_request(
            Request::builder()
                .method(Method::GET)
                .uri("/")
                .body(Vec::new())
                .unwrap(),
        );

        assert!(matches!(csp.before(&mut ctx), Verdict::Continue));
        let nonce = ctx.csp_nonce().unwrap().to_string();
        let value = ctx
            .pending_headers()
            .get("content-security-policy")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(value.contains(&format!("'nonce-{nonce}'")));
    }

    #[test]
    fn test_invalid_report_uri_is_construction_error() {
        let config = CspConfig {
            report_uri: Some("not a url".to_string()),
        };
        assert!(Csp::new(&config).is_err());
    }
}
