//! Per-request context.
//!
//! # Responsibilities
//! - Immutable view of the inbound request (method, URI, headers, buffered
//!   body)
//! - Mutable pending-response header accumulator
//! - Per-request extension slot for the CSP nonce
//!
//! # Design Decisions
//! - Owned exclusively by one in-flight request, discarded after the
//!   response is sent; nothing survives across requests
//! - Host matching is case-insensitive with the port stripped (per HTTP
//!   spec); the body is buffered so token extraction stays synchronous

use axum::http::header::AsHeaderName;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, Request, Uri};

/// Immutable request view plus the pending response accumulator.
pub struct RequestContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Vec<u8>,
    pending: HeaderMap,
    csp_nonce: Option<String>,
}

impl RequestContext {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            pending: HeaderMap::new(),
            csp_nonce: None,
        }
    }

    /// Build a context from a buffered request.
    pub fn from_request(request: Request<Vec<u8>>) -> Self {
        let (parts, body) = request.into_parts();
        Self::new(parts.method, parts.uri, parts.headers, body)
    }

    /// Build a context by cloning the request head, leaving the original
    /// parts available to re-assemble the request for the handler.
    pub fn from_parts(parts: &Parts, body: Vec<u8>) -> Self {
        Self::new(
            parts.method.clone(),
            parts.uri.clone(),
            parts.headers.clone(),
            body,
        )
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Request header as a string, if present and valid UTF-8.
    pub fn header_str<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Target host, lowercased with any port stripped. Taken from the Host
    /// header, falling back to the URI authority. `None` when the request
    /// carries neither.
    pub fn host(&self) -> Option<String> {
        let raw = self
            .header_str(header::HOST)
            .or_else(|| self.uri.authority().map(|a| a.as_str()))?;
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(strip_port(raw).to_ascii_lowercase())
    }

    /// Value of a cookie from the Cookie request header.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        let header = self.header_str(header::COOKIE)?;
        header.split(';').find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then_some(v)
        })
    }

    /// Value of a form field when the body is urlencoded. `None` for any
    /// other content type.
    pub fn form_field(&self, name: &str) -> Option<String> {
        let content_type = self.header_str(header::CONTENT_TYPE)?;
        if !content_type
            .to_ascii_lowercase()
            .starts_with("application/x-www-form-urlencoded")
        {
            return None;
        }
        url::form_urlencoded::parse(&self.body)
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Append a pending response header (multimap semantics).
    pub fn append_response_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.pending.append(name, value);
    }

    /// Set a pending response header, replacing earlier values.
    pub fn set_response_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.pending.insert(name, value);
    }

    /// Headers accumulated for the outgoing response.
    pub fn pending_headers(&self) -> &HeaderMap {
        &self.pending
    }

    /// Per-request CSP nonce, available to handlers that emit inline
    /// scripts.
    pub fn csp_nonce(&self) -> Option<&str> {
        self.csp_nonce.as_deref()
    }

    pub(crate) fn set_csp_nonce(&mut self, nonce: String) {
        self.csp_nonce = Some(nonce);
    }
}

/// Strip a trailing `:port` from an authority, leaving IPv6 literals
/// (`[::1]:8080`) intact.
fn strip_port(authority: &str) -> &str {
    if authority.starts_with('[') {
        match authority.find(']') {
            Some(i) => &authority[..=i],
            None => authority,
        }
    } else {
        match authority.split_once(':') {
            Some((host, _)) => host,
            None => authority,
        }
    }
}
