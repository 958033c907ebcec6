//! In-memory [`HttpClient`] for unit tests
//!
//! Replies are keyed by `"METHOD /path"`. Every call is recorded, including
//! the JSON body when there is one.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{FilePart, HttpClient};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16, String),
}

#[derive(Debug, Clone)]
pub struct Call {
    pub key: String,
    pub body: Option<Value>,
}

#[derive(Debug)]
pub struct MockHttp {
    base_url: String,
    replies: Mutex<HashMap<String, Reply>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl MockHttp {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            replies: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(self, key: &str, value: Value) -> Self {
        self.set(key, value);
        self
    }

    pub fn fail(self, key: &str, status: u16, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .insert(key.to_string(), Reply::Status(status, message.to_string()));
        self
    }

    /// Replace a reply after construction
    pub fn set(&self, key: &str, value: Value) {
        self.replies
            .lock()
            .unwrap()
            .insert(key.to_string(), Reply::Json(value));
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.key.clone())
            .collect()
    }

    pub fn last_body(&self, key: &str) -> Option<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|c| c.key == key)
            .and_then(|c| c.body.clone())
    }

    async fn reply<T: DeserializeOwned>(&self, key: String, body: Option<Value>) -> ClientResult<T> {
        self.calls.lock().unwrap().push(Call {
            key: key.clone(),
            body,
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = self.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Json(value)) => Ok(serde_json::from_value(value)?),
            Some(Reply::Status(status, message)) => Err(ClientError::http(status, message)),
            None => Err(ClientError::Network(format!("connection refused: {}", key))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttp {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.reply(format!("GET {}", path), None).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let query = serde_json::to_value(query)?;
        self.reply(format!("GET {}", path), Some(query)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.reply(format!("POST {}", path), Some(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let body = serde_json::to_value(body)?;
        self.reply(format!("PUT {}", path), Some(body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.reply(format!("DELETE {}", path), None).await
    }

    async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        parts: Vec<FilePart>,
    ) -> ClientResult<T> {
        let names: Vec<Value> = parts
            .iter()
            .map(|p| Value::String(format!("{}:{}", p.field, p.file_name)))
            .collect();
        self.reply(format!("POST {}", path), Some(Value::Array(names)))
            .await
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
