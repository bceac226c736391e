//! Oneshot HTTP client - in-process calls (feature "in-process")
//!
//! Drives an axum `Router` through tower's `oneshot`, so a backend (or a
//! mock of one) can be exercised without a socket.

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use super::{decode_success, error_from_status};
use super::http::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

/// Oneshot HTTP client (in-memory)
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use pos_client::{OneshotHttpClient, Session};
///
/// let client = OneshotHttpClient::new(router, Session::with_token("t"));
/// let branches: Vec<Branch> = client.get("branches").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    session: Session,
}

impl OneshotHttpClient {
    pub fn new(router: Router, session: Session) -> Self {
        Self { router, session }
    }

    fn build_request(&self, method: Method, path: &str, body: Body) -> ClientResult<Request<Body>> {
        let uri = format!("/{}", path.trim_start_matches('/'));
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = self.session.auth_header() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }

        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(error_from_status(status, text));
        }

        decode_success(&body_bytes)
    }

    fn json_body<B: serde::Serialize>(body: &B) -> ClientResult<Body> {
        Ok(Body::from(serde_json::to_vec(body)?))
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, Self::json_body(body)?)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::PUT, path, Self::json_body(body)?)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, Body::empty())?;
        self.execute(request).await
    }

    fn token(&self) -> Option<&str> {
        self.session.token()
    }
}
