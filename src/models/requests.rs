//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{QueryParams, RequestDescriptor, ResponseEvent};
use crate::error::{CacheError, Result};

/// Request body identifying a cached request (POST /lookup, /has, /bust)
///
/// Every field is optional on the wire. A body without a method or URL
/// identifies nothing and is answered as "not cached".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LookupRequest {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Object of params, a query string, or a list of `[name, value]` pairs
    #[serde(default)]
    pub params: Option<Value>,
}

impl LookupRequest {
    /// Converts the body into a descriptor, or `None` if it is incomplete
    /// or its params cannot be read.
    pub fn descriptor(&self) -> Option<RequestDescriptor> {
        self.try_descriptor().ok()
    }

    /// Like [`descriptor`](Self::descriptor), but says what was wrong.
    pub fn try_descriptor(&self) -> Result<RequestDescriptor> {
        let (method, url) = match (
            self.method.as_deref().filter(|m| !m.is_empty()),
            self.url.as_deref().filter(|u| !u.is_empty()),
        ) {
            (Some(method), Some(url)) => (method, url),
            _ => {
                return Err(CacheError::InvalidRequest(
                    "Request must include a method and a url".to_string(),
                ))
            }
        };

        let params = match &self.params {
            None | Some(Value::Null) => None,
            Some(value) => Some(QueryParams::try_from(value.clone())?),
        };
        Ok(RequestDescriptor::new(method, url).with_params(params))
    }
}

/// Request body for the insert operation (PUT /entries)
#[derive(Debug, Clone, Deserialize)]
pub struct InsertRequest {
    #[serde(flatten)]
    pub request: LookupRequest,
    /// Event observed for the request; only successful responses are stored
    pub event: ResponseEvent,
}
