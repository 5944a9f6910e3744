use std::env;

use log::debug;
use reqwest::{header, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{session::TokenStore, ApiError, ApiResult};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Typed client for the monitoring backend. The session is dependency
/// injected rather than read from ambient storage; see
/// [`crate::session::TokenStore`].
#[derive(Debug, Clone)]
pub struct ApiClient<S>
where
    S: TokenStore,
{
    base_url: String,
    http: reqwest::Client,
    session: S,
}

impl<S> ApiClient<S>
where
    S: TokenStore,
{
    pub fn new<U>(base_url: U, session: S) -> Self
    where
        U: Into<String>,
    {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
            session,
        }
    }

    /// Base URL from `MONITORING_API_URL`, falling back to the local
    /// development backend.
    pub fn from_env(session: S) -> Self {
        let base_url = env::var("MONITORING_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_owned());
        Self::new(base_url, session)
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        debug!("{} {}", method, url);
        let mut request = self
            .http
            .request(method, url.as_str())
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = self.session.get() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            // The token is no longer usable; drop it. Navigation is left to
            // whoever handles the error.
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let response = response
                .text()
                .await
                .ok()
                .filter(|text| !text.is_empty());
            return Err(ApiError::InvalidResponse {
                status_code: status,
                url,
                response,
            });
        }
        Ok(response)
    }

    pub(crate) async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(method, path, body).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::GET, path, None).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        // Delete endpoints answer 204 No Content, so there is no body to
        // decode.
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use crate::{ApiError, MemorySession, TokenStore};

    use super::*;

    /// Answers exactly one request with a canned HTTP response and returns
    /// the base URL to reach it.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buffer = [0u8; 4096];
            let _ = stream.read(&mut buffer).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{}", address)
    }

    #[tokio::test]
    async fn unauthorized_reply_clears_the_session() {
        let base_url =
            serve_once("HTTP/1.1 401 Unauthorized\r\ncontent-length: 0\r\n\r\n")
                .await;
        let session = Arc::new(MemorySession::new());
        session.set("stale-token".to_owned());
        let client = ApiClient::new(base_url, Arc::clone(&session));
        let result = client.get::<serde_json::Value>("/auth/me").await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(session.get(), None);
    }

    #[tokio::test]
    async fn error_reply_carries_status_and_body() {
        let base_url = serve_once(
            "HTTP/1.1 404 Not Found\r\n\
             content-type: application/json\r\n\
             content-length: 22\r\n\r\n\
             {\"detail\":\"no existe\"}",
        )
        .await;
        let client = ApiClient::new(base_url, MemorySession::new());
        let result = client
            .get::<serde_json::Value>("/monitoreo/ninos/99/")
            .await;
        match result {
            Err(ApiError::InvalidResponse {
                status_code,
                url,
                response,
            }) => {
                assert_eq!(status_code, StatusCode::NOT_FOUND);
                assert!(url.ends_with("/monitoreo/ninos/99/"));
                assert_eq!(response.as_deref(), Some("{\"detail\":\"no existe\"}"));
            }
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let base_url = serve_once("HTTP/1.1 204 No Content\r\n\r\n").await;
        let client = ApiClient::new(base_url, MemorySession::new());
        client.delete("/monitoreo/ninos/12/").await.unwrap();
    }

    #[tokio::test]
    async fn successful_reply_is_decoded() {
        let base_url = serve_once(
            "HTTP/1.1 200 OK\r\n\
             content-type: application/json\r\n\
             content-length: 13\r\n\r\n\
             {\"count\": 42}",
        )
        .await;
        let client = ApiClient::new(base_url, MemorySession::new());
        let value = client
            .get::<serde_json::Value>("/monitoreo/dashboard-unificado/")
            .await
            .unwrap();
        assert_eq!(value["count"], 42);
    }
}
