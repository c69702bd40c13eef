//! Fetch-metadata resource isolation.
//!
//! Inspects the `Sec-Fetch-Site`/`Sec-Fetch-Mode`/`Sec-Fetch-Dest` signals
//! to reject cross-origin resource loads while allowing same-origin
//! traffic and top-level navigations.
//!
//! This is a heuristic allow-list, not a cryptographic check. Requests
//! without the signals (older clients) pass — failing open here is the
//! accepted compatibility tradeoff, and the XSRF validator still covers
//! state-changing requests from such clients.

use axum::http::{HeaderName, Method};

use crate::pipeline::{Interceptor, Rejection, RequestContext, Verdict};

static SEC_FETCH_SITE: HeaderName = HeaderName::from_static("sec-fetch-site");
static SEC_FETCH_MODE: HeaderName = HeaderName::from_static("sec-fetch-mode");
static SEC_FETCH_DEST: HeaderName = HeaderName::from_static("sec-fetch-dest");

/// Blocking resource-isolation interceptor.
#[derive(Debug, Default)]
pub struct FetchMetadata;

impl FetchMetadata {
    fn allows(&self, ctx: &RequestContext) -> bool {
        let site = match ctx.header_str(&SEC_FETCH_SITE) {
            Some(site) => site.to_ascii_lowercase(),
            // Older clients never send the signal.
            None => return true,
        };

        if matches!(site.as_str(), "same-origin" | "same-site" | "none") {
            return true;
        }

        // Cross-site: permit only top-level navigations that cannot be
        // abused as an embedded resource load.
        let mode = ctx
            .header_str(&SEC_FETCH_MODE)
            .map(|m| m.to_ascii_lowercase())
            .unwrap_or_default();
        let dest = ctx
            .header_str(&SEC_FETCH_DEST)
            .map(|d| d.to_ascii_lowercase())
            .unwrap_or_default();

        mode == "navigate"
            && matches!(*ctx.method(), Method::GET | Method::HEAD)
            && !matches!(dest.as_str(), "object" | "embed")
    }
}

impl Interceptor for FetchMetadata {
    fn name(&self) -> &'static str {
        "fetch_metadata"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        if self.allows(ctx) {
            Verdict::Continue
        } else {
            Verdict::Halt(Rejection::forbidden())
        }
    }
}
