//! Request Descriptor Module
//!
//! The identity of a request for cache matching: method, URL and params.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cache::{are_basically_equal, CacheEntry, ParamSource, QueryParams};

// == Request Descriptor ==
/// Identifies a request for cache lookups.
///
/// Method and URL must match exactly (method is case-sensitive). Params are
/// compared with the fuzzy rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<QueryParams>,
}

impl RequestDescriptor {
    // == Constructor ==
    /// Creates a descriptor without params.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            params: None,
        }
    }

    /// Attaches params from any supported source.
    pub fn with_params(mut self, params: impl ParamSource) -> Self {
        self.params = params.into_query_params();
        self
    }

    // == Has Params ==
    /// Returns true when params are absent or non-empty.
    ///
    /// Only an explicitly empty parameter set reports `false`.
    pub fn has_params(&self) -> bool {
        self.params.as_ref().map_or(true, |params| !params.is_empty())
    }

    // == Matches ==
    /// Exact method and URL, fuzzy-equal params.
    pub fn matches(&self, other: &RequestDescriptor) -> bool {
        self.method == other.method
            && self.url == other.url
            && are_basically_equal(self.params.as_ref(), other.params.as_ref())
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)?;
        match &self.params {
            Some(params) if !params.is_empty() => write!(f, "?{}", params),
            _ => Ok(()),
        }
    }
}

// == Conversions ==
impl From<&RequestDescriptor> for RequestDescriptor {
    fn from(descriptor: &RequestDescriptor) -> Self {
        descriptor.clone()
    }
}

impl From<&CacheEntry> for RequestDescriptor {
    fn from(entry: &CacheEntry) -> Self {
        entry.request.clone()
    }
}

impl<M, U> From<(M, U)> for RequestDescriptor
where
    M: Into<String>,
    U: Into<String>,
{
    fn from((method, url): (M, U)) -> Self {
        Self::new(method, url)
    }
}

impl<M, U, P> From<(M, U, P)> for RequestDescriptor
where
    M: Into<String>,
    U: Into<String>,
    P: ParamSource,
{
    fn from((method, url, params): (M, U, P)) -> Self {
        Self::new(method, url).with_params(params)
    }
}
