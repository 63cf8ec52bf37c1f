// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Types exchanged with the storage client.

use crate::{Error, Result};
use bytes::Bytes;
use http::HeaderMap;
use serde_json::Value;

/// The data uploaded by [insert()][crate::client::StorageClient::insert].
///
/// Strings are uploaded verbatim, JSON values are serialized before the
/// upload.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::model::Payload;
/// let text = Payload::from("hello world");
/// assert_eq!(text.to_bytes()?.as_ref(), b"hello world");
///
/// let json = Payload::from(serde_json::json!({"greeting": "hello"}));
/// assert_eq!(json.to_bytes()?.as_ref(), br#"{"greeting":"hello"}"#);
/// # Ok::<(), google_cloud_storage_rest::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Sent without any changes.
    Text(String),
    /// Serialized as JSON before it is sent.
    Json(Value),
}

impl Payload {
    /// Serializes the payload into the bytes sent to the service.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Self::Text(s) => Ok(Bytes::from(s.clone())),
            Self::Json(v) => serde_json::to_vec(v).map(Bytes::from).map_err(Error::ser),
        }
    }

    /// Returns true if the payload is "falsy", i.e. an empty string, `null`,
    /// `false` or zero.
    pub(crate) fn is_falsy(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Json(v) => !is_truthy(v),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        // A JSON string is already a string, upload it verbatim.
        match value {
            Value::String(s) => Self::Text(s),
            v => Self::Json(v),
        }
    }
}

/// A successful response from the service.
///
/// `body` holds the bytes exactly as received, `data` is the same body decoded
/// based on its content type. Use `body` when the exact contents matter, for
/// example to download a JSON object without reordering its keys.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Response {
    /// The HTTP status code, always less than 400.
    pub status: u16,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body, unmodified.
    pub body: Bytes,
    /// The decoded response body.
    pub data: ResponseData,
}

impl Response {
    pub(crate) fn new(status: u16, headers: HeaderMap, body: Bytes, data: ResponseData) -> Self {
        Self {
            status,
            headers,
            body,
            data,
        }
    }
}

/// The body of a response, decoded based on its content.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseData {
    /// The response had no body.
    Empty,
    /// A JSON response, such as object or bucket metadata.
    Json(Value),
    /// A non-JSON response that is valid UTF-8.
    Text(String),
    /// Any other response.
    Binary(Bytes),
}

impl ResponseData {
    /// Decodes a response body.
    ///
    /// The body is parsed as JSON when the content type mentions `json` and
    /// the body is valid JSON. Otherwise the body is returned as text if it is
    /// valid UTF-8, and as raw bytes if it is not.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::model::ResponseData;
    /// let data = ResponseData::decode(Some("text/plain"), bytes::Bytes::from_static(b"hello"));
    /// assert_eq!(data, ResponseData::Text("hello".to_string()));
    /// ```
    pub fn decode(content_type: Option<&str>, body: Bytes) -> Self {
        if body.is_empty() {
            return Self::Empty;
        }
        if content_type.is_some_and(|c| c.contains("json")) {
            if let Ok(v) = serde_json::from_slice::<Value>(&body) {
                return Self::Json(v);
            }
        }
        match String::from_utf8(body.to_vec()) {
            Ok(s) => Self::Text(s),
            Err(_) => Self::Binary(body),
        }
    }

    /// Returns the JSON value, if the response was JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the text, if the response was text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the raw bytes for text and binary responses.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(s) => Some(s.as_bytes()),
            Self::Binary(b) => Some(b.as_ref()),
            _ => None,
        }
    }
}

/// An object location in `bucket/name` form.
///
/// The first segment is the bucket, the remaining segments (joined with `/`)
/// are the object name.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::model::ObjectPath;
/// let path = ObjectPath::parse("my-bucket/reports/2025/q1.csv")?;
/// assert_eq!(path.bucket(), "my-bucket");
/// assert_eq!(path.name(), "reports/2025/q1.csv");
/// # Ok::<(), google_cloud_storage_rest::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectPath {
    bucket: String,
    name: String,
}

impl ObjectPath {
    /// Splits `path` into a bucket and an object name.
    pub fn parse(path: &str) -> Result<Self> {
        let mut segments = path.split('/');
        let bucket = segments.next().unwrap_or_default();
        if bucket.is_empty() {
            return Err(Error::binding(PathError::MissingBucket(path.to_string())));
        }
        let name = segments.collect::<Vec<_>>().join("/");
        if name.is_empty() {
            return Err(Error::binding(PathError::MissingName(path.to_string())));
        }
        Ok(Self {
            bucket: bucket.to_string(),
            name,
        })
    }

    /// The bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The object name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(thiserror::Error, Debug)]
enum PathError {
    #[error("the object path `{0}` does not start with a bucket name")]
    MissingBucket(String),
    #[error("the object path `{0}` has no object name, expected `bucket/name`")]
    MissingName(String),
}

/// Follows the truthiness rules of JSON-based clients: `null`, `false`, zero
/// and the empty string are falsy, everything else is truthy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
