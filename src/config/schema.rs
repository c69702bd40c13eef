//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! pipeline. All types derive Serde traits for deserialization from config
//! files; every policy section has a safe default so an empty file yields
//! the strictest sensible configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the security pipeline.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Canonical hostnames this deployment serves. Must be non-empty.
    pub hosts: Vec<String>,

    /// Strict-Transport-Security policy.
    pub hsts: HstsConfig,

    /// Cross-Origin-Opener-Policy.
    pub coop: CoopConfig,

    /// Content-Security-Policy.
    pub csp: CspConfig,

    /// Anti-framing policy.
    pub framing: FramingConfig,

    /// XSRF token validation.
    pub xsrf: XsrfConfig,
}

/// HSTS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HstsConfig {
    /// max-age directive in seconds. Zero is rejected at validation.
    pub max_age_secs: u64,

    /// Emit the includeSubDomains directive.
    pub include_subdomains: bool,

    /// Emit the preload directive.
    pub preload: bool,
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self {
            // One year, the value browsers require for preload lists.
            max_age_secs: 31_536_000,
            include_subdomains: true,
            preload: false,
        }
    }
}

/// Cross-Origin-Opener-Policy value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CoopPolicy {
    #[default]
    SameOrigin,
    SameOriginAllowPopups,
    UnsafeNone,
}

impl CoopPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoopPolicy::SameOrigin => "same-origin",
            CoopPolicy::SameOriginAllowPopups => "same-origin-allow-popups",
            CoopPolicy::UnsafeNone => "unsafe-none",
        }
    }
}

/// COOP configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CoopConfig {
    /// Opener policy to emit.
    pub policy: CoopPolicy,

    /// Reporting group appended as `report-to="<group>"`. Omitted when
    /// unset.
    pub report_group: Option<String>,
}

/// CSP configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CspConfig {
    /// Violation report endpoint emitted as a `report-uri` directive.
    /// Omitted when unset; must parse as a URL when set.
    pub report_uri: Option<String>,
}

/// Anti-framing configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FramingConfig {
    /// Violation report endpoint for the report-only frame-ancestors
    /// policy. Omitted when unset; must parse as a URL when set.
    pub report_uri: Option<String>,

    /// Reject cross-site framing attempts outright instead of relying on
    /// the browser to enforce the response headers.
    pub strict: bool,
}

/// XSRF token validation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct XsrfConfig {
    /// Secret application key tokens are derived from. Must be non-empty.
    pub secret_key: String,

    /// Cookie whose value scopes the token to a session.
    pub session_cookie: String,
}

impl Default for XsrfConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            session_cookie: "session".to_string(),
        }
    }
}
