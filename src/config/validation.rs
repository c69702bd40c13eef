//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the guards the pipeline depends on (non-empty hosts, non-empty
//!   XSRF secret, positive HSTS max-age)
//! - Validate report endpoints as URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: PipelineConfig → Result<(), Vec<ValidationError>>
//! - Runs before any interceptor is constructed

use thiserror::Error;
use url::Url;

use crate::config::schema::PipelineConfig;

/// A single semantic violation in a [`PipelineConfig`].
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The host allow-list is empty; the pipeline would reject everything.
    #[error("hosts cannot be empty")]
    EmptyHosts,

    /// A configured host is blank.
    #[error("host entry {0} is blank")]
    BlankHost(usize),

    /// The XSRF secret key is empty.
    #[error("xsrf secret key cannot be empty")]
    EmptyXsrfSecret,

    /// HSTS max-age of zero would instruct clients to forget the policy.
    #[error("hsts max-age must be greater than zero")]
    ZeroHstsMaxAge,

    /// A report endpoint is not a parseable URL.
    #[error("{section} report-uri is not a valid URL: {value}")]
    InvalidReportUri { section: &'static str, value: String },
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &PipelineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.hosts.is_empty() {
        errors.push(ValidationError::EmptyHosts);
    }
    for (i, host) in config.hosts.iter().enumerate() {
        if host.trim().is_empty() {
            errors.push(ValidationError::BlankHost(i));
        }
    }

    if config.xsrf.secret_key.is_empty() {
        errors.push(ValidationError::EmptyXsrfSecret);
    }

    if config.hsts.max_age_secs == 0 {
        errors.push(ValidationError::ZeroHstsMaxAge);
    }

    if let Some(uri) = &config.csp.report_uri {
        if Url::parse(uri).is_err() {
            errors.push(ValidationError::InvalidReportUri {
                section: "csp",
                value: uri.clone(),
            });
        }
    }
    if let Some(uri) = &config.framing.report_uri {
        if Url::parse(uri).is_err() {
            errors.push(ValidationError::InvalidReportUri {
                section: "framing",
                value: uri.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.hosts = vec!["example.com".to_string()];
        config.xsrf.secret_key = "k".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = PipelineConfig::default();
        config.hsts.max_age_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        // Empty hosts, empty secret, and zero max-age all reported at once.
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_bad_report_uri_rejected() {
        let mut config = valid_config();
        config.csp.report_uri = Some("not a url".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ValidationError::InvalidReportUri { section: "csp", .. }
        ));
    }

    #[test]
    fn test_blank_host_rejected() {
        let mut config = valid_config();
        config.hosts.push("  ".to_string());

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::BlankHost(1)));
    }
}
