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

use super::client::StorageInner;
use super::normalize::normalize;
use super::urls;
use super::validation::required;
use crate::content_type::file_info;
use crate::headers::{bearer, merge_headers};
use crate::model::{ObjectPath, Payload, Response};
use crate::transport::HttpRequest;
use crate::{Error, Result};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderName, HeaderValue};
use http::HeaderMap;
use std::sync::Arc;

/// A request builder for object uploads.
///
/// Created by [StorageClient::insert()][crate::client::StorageClient::insert].
/// The request is not sent until [send()][InsertObject::send] is called.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::client::StorageClient;
/// use http::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderValue};
/// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
/// let response = client
///     .insert("a,b\n1,2\n", "my-bucket/data/table", token)
///     .with_header(CONTENT_TYPE, HeaderValue::from_static("text/csv"))
///     .with_header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
///     .send()
///     .await?;
/// println!("response details={response:?}");
/// # Ok(()) }
/// ```
pub struct InsertObject {
    inner: Arc<StorageInner>,
    object: Payload,
    file_path: String,
    token: String,
    headers: HeaderMap,
}

impl InsertObject {
    pub(crate) fn new<P, F, T>(inner: Arc<StorageInner>, object: P, file_path: F, token: T) -> Self
    where
        P: Into<Payload>,
        F: Into<String>,
        T: Into<String>,
    {
        Self {
            inner,
            object: object.into(),
            file_path: file_path.into(),
            token: token.into(),
            headers: HeaderMap::new(),
        }
    }

    /// Sets a request header.
    ///
    /// Headers set here replace the headers computed by the client, including
    /// `Content-Type`, `Content-Length` and `Authorization`. Calling this more
    /// than once with the same name sends all the values.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets several request headers.
    ///
    /// See [with_header()][InsertObject::with_header].
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = merge_headers(self.headers, headers);
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<Response> {
        if self.object.is_falsy() {
            return Err(Error::missing_parameter("object"));
        }
        required("file_path", &self.file_path)?;
        required("token", &self.token)?;
        let path = ObjectPath::parse(&self.file_path)?;
        let body = self.object.to_bytes()?;

        let info = file_info(&self.file_path);
        let mut headers = bearer(&self.token)?;
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(info.content_type_or_default()).map_err(Error::binding)?,
        );
        headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
        let headers = merge_headers(headers, self.headers);

        let url = urls::upload_object(&self.inner.upload_endpoint, path.bucket(), path.name());
        tracing::debug!(
            bucket = path.bucket(),
            name = path.name(),
            size = body.len(),
            "uploading object"
        );
        let request = HttpRequest::post(url).with_headers(headers).with_body(body);
        let response = self.inner.execute(request).await?;
        normalize(response)
    }
}

impl std::fmt::Debug for InsertObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsertObject")
            .field("inner", &self.inner)
            .field("object", &self.object)
            .field("file_path", &self.file_path)
            .field("token", &"[censored]")
            .field("headers", &self.headers)
            .finish()
    }
}
