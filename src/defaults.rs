//! Ready-to-use pipeline assembly.
//!
//! # Design Decisions
//! - The interceptor order is a security contract: header-only policies
//!   run first so even rejected requests leave with the baseline headers,
//!   then the blocking validators run before any handler side effect
//! - Assembly fails fast on an invalid configuration; there is no way to
//!   obtain a partially-configured pipeline

use crate::config::validation::validate_config;
use crate::config::PipelineConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, Pipeline};
use crate::policy::{Coop, Csp, FramingHeaders, FramingIsolation, Hsts, StaticHeaders};
use crate::validators::{FetchMetadata, HostCheck, Xsrf};

/// Build a pipeline with all built-in policies and the default
/// configuration.
///
/// `hosts` are all the hostnames this deployment serves and cannot be
/// empty. `xsrf_key` is the secret application key for XSRF token
/// derivation and cannot be empty.
pub fn pipeline(
    hosts: Vec<String>,
    xsrf_key: impl Into<String>,
) -> Result<Pipeline, ConfigError> {
    let mut config = PipelineConfig::default();
    config.hosts = hosts;
    config.xsrf.secret_key = xsrf_key.into();
    pipeline_from_config(&config)
}

/// Build a pipeline from a full configuration, validating it first.
pub fn pipeline_from_config(config: &PipelineConfig) -> Result<Pipeline, ConfigError> {
    validate_config(config).map_err(ConfigError::Validation)?;

    let mut interceptors: Vec<Box<dyn Interceptor>> = Vec::new();

    // Non-blocking:
    interceptors.push(Box::new(StaticHeaders));
    interceptors.push(Box::new(Hsts::new(&config.hsts)?));
    interceptors.push(Box::new(Coop::new(&config.coop)?));
    interceptors.push(Box::new(Csp::new(&config.csp)?));

    // Blocking:
    interceptors.push(Box::new(HostCheck::new(&config.hosts)?));
    interceptors.push(Box::new(FetchMetadata));
    interceptors.push(Box::new(Xsrf::new(&config.xsrf)?));
    interceptors.push(Box::new(FramingHeaders::new(&config.framing)?));
    if config.framing.strict {
        interceptors.push(Box::new(FramingIsolation));
    }

    Ok(Pipeline::new(interceptors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order_is_fixed() {
        let pipeline = pipeline(vec!["example.com".to_string()], "k").unwrap();
        assert_eq!(
            pipeline.interceptor_names(),
            vec![
                "static_headers",
                "hsts",
                "coop",
                "csp",
                "hostcheck",
                "fetch_metadata",
                "xsrf",
                "framing_headers",
            ]
        );
    }

    #[test]
    fn test_strict_framing_appends_isolation() {
        let mut config = PipelineConfig::default();
        config.hosts = vec!["example.com".to_string()];
        config.xsrf.secret_key = "k".to_string();
        config.framing.strict = true;

        let pipeline = pipeline_from_config(&config).unwrap();
        assert_eq!(
            pipeline.interceptor_names().last(),
            Some(&"framing_isolation")
        );
    }

    #[test]
    fn test_empty_hosts_fails() {
        assert!(pipeline(vec![], "k").is_err());
    }

    #[test]
    fn test_empty_secret_fails() {
        assert!(pipeline(vec!["example.com".to_string()], "").is_err());
    }
}
