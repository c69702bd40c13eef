//! Host allow-list validation.
//!
//! # Responsibilities
//! - Match the request's target host (case-insensitive, port stripped)
//!   against the configured set
//! - Reject host mismatches before any handler side effect
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec); the allow-list is
//!   lowercased once at construction
//! - A missing Host/authority is a rejection, never a wildcard match
//! - Misses answer 404 rather than 403: a Forbidden would confirm the
//!   deployment serves the probed name

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::pipeline::{Interceptor, Rejection, RequestContext, Verdict};

/// Blocking interceptor comparing the request host against an allow-list.
#[derive(Debug)]
pub struct HostCheck {
    hosts: HashSet<String>,
}

impl HostCheck {
    /// Compile the allow-list. An empty list is a construction error: it
    /// would silently reject every request.
    pub fn new(hosts: &[String]) -> Result<Self, ConfigError> {
        if hosts.is_empty() {
            return Err(ConfigError::Malformed("hosts cannot be empty".to_string()));
        }
        Ok(Self {
            hosts: hosts.iter().map(|h| h.trim().to_ascii_lowercase()).collect(),
        })
    }
}

impl Interceptor for HostCheck {
    fn name(&self) -> &'static str {
        "hostcheck"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        match ctx.host() {
            Some(host) if self.hosts.contains(&host) => Verdict::Continue,
            _ => Verdict::Halt(Rejection::not_found()),
        }
    }
}
