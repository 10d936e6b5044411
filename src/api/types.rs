use super::ApiClient;
use crate::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Flat query map. Pairs are encoded in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Adds the pair only when a value is present.
    pub fn opt_param<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Query::new(), |query, (k, v)| query.param(k, v))
    }
}

pub enum Body {
    Empty,
    /// Serialized with `Content-Type: application/json`.
    Json(Value),
    /// Passed through; the transport picks the multipart content type.
    Multipart(reqwest::multipart::Form),
    /// Passed through without a content type.
    Bytes(Vec<u8>),
}

impl Body {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<reqwest::multipart::Form> for Body {
    fn from(form: reqwest::multipart::Form) -> Self {
        Self::Multipart(form)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
            Self::Multipart(_) => f.write_str("Multipart(..)"),
            Self::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
        }
    }
}

#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Body,
}

impl Request {
    pub fn get(path: impl Into<String>, query: Query) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query,
            body: Body::Empty,
        }
    }

    pub fn post(path: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Query::new(),
            body: body.into(),
        }
    }

    pub fn put(path: impl Into<String>, body: impl Into<Body>) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            query: Query::new(),
            body: body.into(),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            query: Query::new(),
            body: Body::Empty,
        }
    }
}

/// `{success, data | error, ...}` response body, kept exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope(Value);

impl Envelope {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// A missing `success` flag counts as success; only an explicit `false` fails.
    pub fn is_success(&self) -> bool {
        self.0
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    pub fn data(&self) -> Option<&Value> {
        self.0.get("data")
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.0.clone()).map_err(Error::from)
    }

    /// Like [`Envelope::decode`], but a body of the wrong shape is logged and
    /// shown as an error banner before it is returned as
    /// [`Error::MalformedResponse`].
    pub fn decode_or_notify<T: DeserializeOwned>(&self, api: &ApiClient) -> Result<T> {
        self.decode().map_err(|e| {
            let err = Error::malformed(e.to_string());
            error!("Unexpected response shape: {}", err);
            api.notifier().error(err.user_message());
            err
        })
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_inner(self) -> Value {
        self.0
    }
}

/// Outcome of a request that did not fail.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Reply {
    Envelope(Envelope),
    /// The server answered 401 and the page was sent to the login route.
    Redirected,
}

impl Reply {
    pub fn envelope(self) -> Option<Envelope> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::Redirected => None,
        }
    }

    pub fn is_redirected(&self) -> bool {
        matches!(self, Self::Redirected)
    }

    /// Turns the redirect sentinel into [`Error::AuthRequired`].
    pub fn into_result(self) -> Result<Envelope> {
        self.envelope().ok_or(Error::AuthRequired)
    }
}
