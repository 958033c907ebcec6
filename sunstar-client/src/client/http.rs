// sunstar-client/src/client/http.rs
// HTTP client - network transport

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ErrorBody;

/// One file in a multipart upload
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name (`file` or `files`)
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// HTTP client trait
///
/// Paths are relative to the backend root and start with `/api/`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// Multipart POST; the transport sets the multipart content type
    async fn upload<T: DeserializeOwned>(&self, path: &str, parts: Vec<FilePart>)
    -> ClientResult<T>;
    /// Backend root used to resolve relative asset paths
    fn base_url(&self) -> &str;
}

/// Network HTTP client backed by `reqwest`
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must be http(s): {}",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout_duration())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    /// Send, log the lifecycle, and decode the body
    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        req: RequestBuilder,
    ) -> ClientResult<T> {
        tracing::debug!("API Request: {} {}", method, path);

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ClientError::from(e);
                tracing::error!("API Request Error: {} {}: {}", method, path, err);
                return Err(err);
            }
        };

        let status = response.status();
        tracing::debug!("API Response: {} {}", status.as_u16(), path);

        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message())
                .unwrap_or(text);
            tracing::warn!(
                "API Response Error: {} {} -> {}: {}",
                method,
                path,
                status.as_u16(),
                message
            );
            return Err(ClientError::http(status.as_u16(), message));
        }

        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).map_err(|e| {
            tracing::warn!("API Response decode failed: {} {}: {}", method, path, e);
            ClientError::InvalidResponse(format!("{} {}: {}", method, path, e))
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::GET, path);
        self.execute(Method::GET, path, req).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let req = self.request(Method::GET, path).query(query);
        self.execute(Method::GET, path, req).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::POST, path).json(body);
        self.execute(Method::POST, path, req).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(Method::PUT, path).json(body);
        self.execute(Method::PUT, path, req).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.request(Method::DELETE, path);
        self.execute(Method::DELETE, path, req).await
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FilePart>,
    ) -> ClientResult<T> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            let file = reqwest::multipart::Part::bytes(part.bytes)
                .file_name(part.file_name)
                .mime_str(&part.content_type)
                .map_err(|e| ClientError::validation(format!("Invalid content type: {}", e)))?;
            form = form.part(part.field, file);
        }
        let req = self.request(Method::POST, path).multipart(form);
        self.execute(Method::POST, path, req).await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
