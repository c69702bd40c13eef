//! Tower adapter for the pipeline.
//!
//! Wraps an inner service so every request passes through the interceptor
//! chain: the request body is buffered (token extraction is synchronous),
//! the `before` pass runs, and either the rejection is returned or the
//! inner service is called and the `commit` pass is applied to its
//! response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::Response;
use tower::{Layer, Service};

use crate::pipeline::{Pipeline, RequestContext};

const DEFAULT_BODY_LIMIT: usize = 256 * 1024;

/// Layer installing the pipeline in front of an axum service.
#[derive(Clone)]
pub struct ShieldLayer {
    pipeline: Arc<Pipeline>,
    body_limit: usize,
}

impl ShieldLayer {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self {
            pipeline,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap on how many body bytes are buffered for token extraction.
    /// Larger bodies are rejected with 413.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }
}

impl<S> Layer<S> for ShieldLayer {
    type Service = ShieldService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ShieldService {
            inner,
            pipeline: self.pipeline.clone(),
            body_limit: self.body_limit,
        }
    }
}

/// Service produced by [`ShieldLayer`].
#[derive(Clone)]
pub struct ShieldService<S> {
    inner: S,
    pipeline: Arc<Pipeline>,
    body_limit: usize,
}

impl<S> Service<Request> for ShieldService<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        // Take the service that was polled ready; leave the clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let pipeline = self.pipeline.clone();
        let body_limit = self.body_limit;

        Box::pin(async move {
            let (parts, body) = req.into_parts();
            let bytes = match axum::body::to_bytes(body, body_limit).await {
                Ok(bytes) => bytes,
                Err(_) => {
                    let mut response = Response::new(Body::from("Payload Too Large"));
                    *response.status_mut() = StatusCode::PAYLOAD_TOO_LARGE;
                    return Ok(response);
                }
            };

            let mut ctx = RequestContext::from_parts(&parts, bytes.to_vec());
            if let Some(rejection) = pipeline.before(&mut ctx) {
                return Ok(rejection.into_response(ctx.pending_headers()));
            }

            let req = Request::from_parts(parts, Body::from(bytes));
            let response = inner.call(req).await?;

            let (mut parts, body) = response.into_parts();
            pipeline.commit(&ctx, &mut parts);
            crate::observability::record_pass();
            Ok(Response::from_parts(parts, body))
        })
    }
}
