//! Response Event Module
//!
//! Events observed for an outbound request. Only a complete, successful
//! response is ever cached.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Response Snapshot ==
/// Immutable copy of a fully received response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    #[serde(default)]
    pub status_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub body: Value,
}

impl ResponseSnapshot {
    // == Constructor ==
    pub fn new(status: u16, body: impl Into<Value>) -> Self {
        Self {
            status,
            status_text: String::new(),
            url: None,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Shorthand for a `200 OK` response.
    pub fn ok(body: impl Into<Value>) -> Self {
        Self::new(200, body).with_status_text("OK")
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = text.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    // == Is Success ==
    /// 2xx statuses are successful.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// == Response Event ==
/// One event in the lifecycle of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseEvent {
    /// The request left the client.
    Sent,
    UploadProgress {
        loaded: u64,
        #[serde(default)]
        total: Option<u64>,
    },
    /// Status and headers arrived, body still pending.
    ResponseHeader {
        status: u16,
        #[serde(default)]
        headers: BTreeMap<String, String>,
    },
    DownloadProgress {
        loaded: u64,
        #[serde(default)]
        total: Option<u64>,
        #[serde(default)]
        partial_text: Option<String>,
    },
    /// The response was fully received.
    Response(ResponseSnapshot),
    /// Application-defined event.
    User {
        #[serde(default)]
        payload: Value,
    },
}

impl ResponseEvent {
    // == Is Terminal ==
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResponseEvent::Response(_))
    }

    // == Cacheable ==
    /// Returns the snapshot if this event may be stored in the cache.
    pub fn cacheable(&self) -> Option<&ResponseSnapshot> {
        match self {
            ResponseEvent::Response(snapshot) if snapshot.is_success() => Some(snapshot),
            _ => None,
        }
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ResponseEvent::Sent => "sent",
            ResponseEvent::UploadProgress { .. } => "upload_progress",
            ResponseEvent::ResponseHeader { .. } => "response_header",
            ResponseEvent::DownloadProgress { .. } => "download_progress",
            ResponseEvent::Response(_) => "response",
            ResponseEvent::User { .. } => "user",
        }
    }
}

impl From<ResponseSnapshot> for ResponseEvent {
    fn from(snapshot: ResponseSnapshot) -> Self {
        ResponseEvent::Response(snapshot)
    }
}
