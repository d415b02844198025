//! Query Parameter Module
//!
//! Normalizes the different shapes callers use for query parameters into a
//! single ordered sequence of `(name, value)` pairs.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::{CacheError, Result};

// == Query Params ==
/// Canonical, ordered parameter sequence used for cache key comparison.
///
/// Order is kept for display and serialization only; equality between two
/// parameter sets is decided by [`are_basically_equal`](super::are_basically_equal).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct QueryParams {
    pairs: Vec<(String, Value)>,
}

impl QueryParams {
    // == Constructor ==
    /// Creates an empty parameter sequence.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push ==
    /// Appends a pair, keeping any earlier pair with the same name.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    // == Get ==
    /// Returns the value of the first pair named `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Iterates over parameter names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }
}

/// Reads params from JSON: an object, a url-encoded query string, or a list
/// of `[name, value]` pairs. Any other shape is rejected rather than read as
/// "no params".
impl TryFrom<Value> for QueryParams {
    type Error = CacheError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into()),
            Value::String(query) => Ok(MultiParams::parse(&query).to_query_params()),
            Value::Array(items) => items.into_iter().map(pair_from_json).collect(),
            other => Err(CacheError::InvalidRequest(format!(
                "params must be an object, a query string or [name, value] pairs, got {}",
                other
            ))),
        }
    }
}

fn pair_from_json(item: Value) -> Result<(String, Value)> {
    if let Value::Array(pair) = &item {
        let mut parts = pair.iter();
        if let (Some(Value::String(name)), Some(value), None) =
            (parts.next(), parts.next(), parts.next())
        {
            return Ok((name.clone(), value.clone()));
        }
    }
    Err(CacheError::InvalidRequest(format!(
        "param pairs must be [name, value] with a string name, got {}",
        item
    )))
}

impl From<QueryParams> for Map<String, Value> {
    fn from(params: QueryParams) -> Self {
        let mut map = Map::new();
        for (key, value) in params.pairs {
            // First pair wins, matching `QueryParams::get`
            map.entry(key).or_insert(value);
        }
        map
    }
}

/// Renders the params as a query string (`a=1&b=x`).
impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            match value {
                Value::String(s) => serializer.append_pair(key, s),
                Value::Null => serializer.append_key_only(key),
                other => serializer.append_pair(key, &other.to_string()),
            };
        }
        write!(f, "{}", serializer.finish())
    }
}

// == Multi Params ==
/// Multi-valued parameter container where each name may carry several values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiParams {
    entries: Vec<(String, Vec<String>)>,
}

impl MultiParams {
    pub fn new() -> Self {
        Self::default()
    }

    // == Parse ==
    /// Parses a url-encoded query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.append(key, value);
        }
        params
    }

    // == Append ==
    /// Adds a value under `name`, after any values already present.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Builder form of [`append`](Self::append).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    // == Get ==
    /// Returns the first value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).and_then(|values| values.first()).map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One pair per key. Only the first value of each key is surfaced.
    pub fn to_query_params(&self) -> QueryParams {
        self.keys()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
            .collect()
    }
}

// == Param Source ==
/// Anything that can be normalized into [`QueryParams`].
///
/// Returning `None` means "no params at all", which is kept distinct from an
/// empty sequence.
pub trait ParamSource {
    fn into_query_params(self) -> Option<QueryParams>;
}

impl ParamSource for QueryParams {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self)
    }
}

impl ParamSource for &QueryParams {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.clone())
    }
}

impl<P: ParamSource> ParamSource for Option<P> {
    fn into_query_params(self) -> Option<QueryParams> {
        self.and_then(ParamSource::into_query_params)
    }
}

impl ParamSource for &MultiParams {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.to_query_params())
    }
}

impl ParamSource for MultiParams {
    fn into_query_params(self) -> Option<QueryParams> {
        (&self).into_query_params()
    }
}

impl ParamSource for Map<String, Value> {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.into())
    }
}

/// `null` means no params. Shapes that cannot be read as params also yield
/// `None`; use `QueryParams::try_from` where those must be rejected.
impl ParamSource for Value {
    fn into_query_params(self) -> Option<QueryParams> {
        match self {
            Value::Null => None,
            other => QueryParams::try_from(other).ok(),
        }
    }
}

/// Treated as a url-encoded query string.
impl ParamSource for &str {
    fn into_query_params(self) -> Option<QueryParams> {
        MultiParams::parse(self).into_query_params()
    }
}

impl<K: Into<String>, V: Into<Value>> ParamSource for Vec<(K, V)> {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> ParamSource for [(K, V); N] {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>> ParamSource for BTreeMap<K, V> {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<Value>, S: BuildHasher> ParamSource for HashMap<K, V, S> {
    fn into_query_params(self) -> Option<QueryParams> {
        Some(self.into_iter().collect())
    }
}

// == Normalize ==
/// Normalizes any supported parameter source.
pub fn normalize(source: impl ParamSource) -> Option<QueryParams> {
    source.into_query_params()
}
