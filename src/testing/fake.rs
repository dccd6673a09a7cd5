//! Scripted in-memory transport for unit tests

use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{ApiResponse, ApiTransport};
use crate::common::{Error, Result};

enum Reply {
    Response(u16, String),
    /// Request body with `patch` applied; a `null` in the patch drops the key
    Echo(u16, Value),
    Refused,
}

/// Replies are queued per `METHOD path`; an unscripted request is refused
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<(String, Option<Value>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.reply_raw(method, path, status, body.to_string())
    }

    pub fn reply_raw(self, method: &str, path: &str, status: u16, body: impl Into<String>) -> Self {
        self.push(method, path, Reply::Response(status, body.into()));
        self
    }

    pub fn echo(self, method: &str, path: &str, status: u16, patch: Value) -> Self {
        self.push(method, path, Reply::Echo(status, patch));
        self
    }

    pub fn refuse(self, method: &str, path: &str) -> Self {
        self.push(method, path, Reply::Refused);
        self
    }

    /// Requests seen so far as (`METHOD path`, body)
    pub fn requests(&self) -> Vec<(String, Option<Value>)> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, method: &str, path: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(format!("{} {}", method, path))
            .or_default()
            .push_back(reply);
    }

    fn answer(&self, method: &str, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        let key = format!("{} {}", method, path);
        self.requests.lock().unwrap().push((key.clone(), body.cloned()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        match reply {
            Some(Reply::Response(status, body)) => Ok(ApiResponse::new(path, status, body)),
            Some(Reply::Echo(status, patch)) => {
                let mut echoed = body.cloned().unwrap_or(Value::Null);
                if let (Some(fields), Some(patch)) = (echoed.as_object_mut(), patch.as_object()) {
                    for (key, value) in patch {
                        if value.is_null() {
                            fields.remove(key);
                        } else {
                            fields.insert(key.clone(), value.clone());
                        }
                    }
                }
                Ok(ApiResponse::new(path, status, echoed.to_string()))
            }
            Some(Reply::Refused) | None => Err(Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    fn base_url(&self) -> &str {
        "http://scripted.test/api"
    }

    async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.answer("GET", path, None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse> {
        self.answer("POST", path, Some(body))
    }
}
