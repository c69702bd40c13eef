//! XSRF token validation (double-submit, secret-keyed).
//!
//! # Responsibilities
//! - Let safe methods (GET/HEAD/OPTIONS) through unconditionally
//! - Require a token on state-changing methods, taken from the
//!   `X-Xsrf-Token` header or the `xsrf_token` form field
//! - Validate the token against HMAC-SHA256(secret, session scope)
//!
//! # Design Decisions
//! - Verification goes through `Mac::verify_slice`, which compares in
//!   constant time with respect to the secret-derived value
//! - The session scope is the configured session cookie's value; a
//!   missing cookie scopes to the empty string, so anonymous forms still
//!   work and the token rotates once a session is established
//! - Token storage and delivery are the application's job; `token_for`
//!   mints the value to embed in forms or headers

use axum::http::{HeaderName, Method};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::XsrfConfig;
use crate::error::ConfigError;
use crate::pipeline::{Interceptor, Rejection, RequestContext, Verdict};

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the token.
pub static TOKEN_HEADER: HeaderName = HeaderName::from_static("x-xsrf-token");

/// Form field carrying the token in urlencoded bodies.
pub const TOKEN_FIELD: &str = "xsrf_token";

/// Blocking double-submit token validator.
#[derive(Debug)]
pub struct Xsrf {
    secret: String,
    session_cookie: String,
}

impl Xsrf {
    /// An empty secret would make every token forgeable, so it is rejected
    /// outright.
    pub fn new(config: &XsrfConfig) -> Result<Self, ConfigError> {
        if config.secret_key.is_empty() {
            return Err(ConfigError::Malformed(
                "xsrf secret key cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            secret: config.secret_key.clone(),
            session_cookie: config.session_cookie.clone(),
        })
    }

    /// Mint the token for a session scope, hex-encoded. Applications embed
    /// this in forms or expose it to their frontend for the header.
    pub fn token_for(&self, scope: &str) -> String {
        hex::encode(self.mac(scope).finalize().into_bytes())
    }

    fn mac(&self, scope: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(scope.as_bytes());
        mac
    }

    fn verify(&self, scope: &str, presented: &str) -> bool {
        let presented = match hex::decode(presented) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        self.mac(scope).verify_slice(&presented).is_ok()
    }

    fn presented_token(&self, ctx: &RequestContext) -> Option<String> {
        if let Some(token) = ctx.header_str(&TOKEN_HEADER) {
            return Some(token.to_string());
        }
        ctx.form_field(TOKEN_FIELD)
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

impl Interceptor for Xsrf {
    fn name(&self) -> &'static str {
        "xsrf"
    }

    fn before(&self, ctx: &mut RequestContext) -> Verdict {
        if is_safe_method(ctx.method()) {
            return Verdict::Continue;
        }

        let scope = ctx.cookie(&self.session_cookie).unwrap_or("").to_string();
        match self.presented_token(ctx) {
            Some(token) if self.verify(&scope, &token) => Verdict::Continue,
            _ => Verdict::Halt(Rejection::forbidden()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn validator() -> Xsrf {
        Xsrf::new(&XsrfConfig {
            secret_key: "test-secret".to_string(),
            session_cookie: "session".to_string(),
        })
        .unwrap()
    }

    fn post_ctx(headers: &[(&str, &str)], body: &[u8]) -> RequestContext {
        let mut builder = Request::builder().method(Method::POST).uri("/transfer");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        RequestContext::from_request(builder.body(body.to_vec()).unwrap())
    }

    #[test]
    fn test_safe_methods_bypass_validation() {
        let xsrf = validator();
        for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
            let mut ctx = RequestContext::from_request(
                Request::builder()
                    .method(method)
                    .uri("/")
                    .body(Vec::new())
                    .unwrap(),
            );
            assert!(matches!(xsrf.before(&mut ctx), Verdict::Continue));
        }
    }

    #[test]
    fn test_post_without_token_rejected() {
        let xsrf = validator();
        let mut ctx = post_ctx(&[], b"");
        match xsrf.before(&mut ctx) {
            Verdict::Halt(rejection) => assert_eq!(rejection.status().as_u16(), 403),
            Verdict::Continue => panic!("unsafe method without token must be rejected"),
        }
    }

    #[test]
    fn test_valid_header_token_accepted() {
        let xsrf = validator();
        let token = xsrf.token_for("abc123");
        let mut ctx = post_ctx(
            &[("Cookie", "session=abc123"), ("X-Xsrf-Token", &token)],
            b"",
        );
        assert!(matches!(xsrf.before(&mut ctx), Verdict::Continue));
    }

    #[test]
    fn test_valid_form_token_accepted() {
        let xsrf = validator();
        let token = xsrf.token_for("abc123");
        let body = format!("amount=5&xsrf_token={token}");
        let mut ctx = post_ctx(
            &[
                ("Cookie", "session=abc123"),
                ("Content-Type", "application/x-www-form-urlencoded"),
            ],
            body.as_bytes(),
        );
        assert!(matches!(xsrf.before(&mut ctx), Verdict::Continue));
    }

    #[test]
    fn test_token_for_wrong_session_rejected() {
        let xsrf = validator();
        let token = xsrf.token_for("someone-else");
        let mut ctx = post_ctx(
            &[("Cookie", "session=abc123"), ("X-Xsrf-Token", &token)],
            b"",
        );
        assert!(matches!(xsrf.before(&mut ctx), Verdict::Halt(_)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let xsrf = validator();
        let mut ctx = post_ctx(&[("X-Xsrf-Token", "not-hex!")], b"");
        assert!(matches!(xsrf.before(&mut ctx), Verdict::Halt(_)));
    }

    #[test]
    fn test_missing_cookie_scopes_to_empty() {
        let xsrf = validator();
        let token = xsrf.token_for("");
        let mut ctx = post_ctx(&[("X-Xsrf-Token", &token)], b"");
        assert!(matches!(xsrf.before(&mut ctx), Verdict::Continue));
    }

    #[test]
    fn test_empty_secret_is_construction_error() {
        let result = Xsrf::new(&XsrfConfig {
            secret_key: String::new(),
            session_cookie: "session".to_string(),
        });
        assert!(result.is_err());
    }
}
