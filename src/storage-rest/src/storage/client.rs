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

use super::bucket_config::BucketConfig;
use super::insert_object::InsertObject;
use super::normalize::normalize;
use crate::headers::bearer;
use crate::model::{Payload, Response};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::{Error, Result};
use http::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use std::sync::Arc;

/// Implements a client for the Cloud Storage JSON API.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::client::StorageClient;
/// # async fn sample() -> anyhow::Result<()> {
/// let client = StorageClient::builder().build()?;
/// // use `client` to make requests to Cloud Storage.
/// # Ok(()) }
/// ```
///
/// # Configuration
///
/// To configure `StorageClient` use the `with_*` methods in the type returned
/// by [builder()][StorageClient::builder]. The default configuration should
/// work for most applications. Common configuration changes include
///
/// * [with_endpoint()]: by default this client uses the global JSON API
///   endpoint (`https://www.googleapis.com`). Applications using an emulator,
///   or running in restricted networks, may want to override this default.
/// * [with_transport()]: by default this client sends requests using
///   [reqwest]. Applications may provide their own [HttpTransport].
///
/// # Authentication
///
/// Every operation receives an OAuth2 access token and sends it as a bearer
/// token. The client never acquires, caches, or refreshes tokens.
///
/// # Pooling and Cloning
///
/// `StorageClient` holds a connection pool internally, it is advised to
/// create one and then reuse it. You do not need to wrap `StorageClient` in
/// an [Rc](std::rc::Rc) or [Arc] to reuse it, because it already uses an `Arc`
/// internally.
///
/// # Errors
///
/// Operations validate their parameters before sending any request. Empty
/// required parameters fail with an error where
/// [is_missing_parameter()][crate::Error::is_missing_parameter] is true.
/// Responses with a status code of 400 or higher are returned as errors where
/// [is_service()][crate::Error::is_service] is true. There are no retries.
///
/// [with_endpoint()]: ClientBuilder::with_endpoint
/// [with_transport()]: ClientBuilder::with_transport
#[derive(Clone, Debug)]
pub struct StorageClient {
    inner: Arc<StorageInner>,
}

#[derive(Debug)]
pub(crate) struct StorageInner {
    pub transport: Arc<dyn HttpTransport>,
    pub endpoint: String,
    pub upload_endpoint: String,
    pub public_endpoint: String,
}

impl StorageClient {
    /// Returns a builder for [StorageClient].
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = StorageClient::builder().build()?;
    /// # Ok(()) }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Uploads an object using a single-shot media upload.
    ///
    /// Strings are uploaded verbatim, JSON values are serialized before they
    /// are uploaded. The `Content-Type` header is guessed from the extension in
    /// `file_path`, and defaults to `application/json`. Use
    /// [with_header()][InsertObject::with_header] to override the computed
    /// headers.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let response = client
    ///     .insert(serde_json::json!({"answer": 42}), "my-bucket/answers/latest.json", token)
    ///     .send()
    ///     .await?;
    /// println!("response details={response:?}");
    /// # Ok(()) }
    /// ```
    ///
    /// # Parameters
    /// * `object` - the object data.
    /// * `file_path` - the destination, in `bucket/object-name` format.
    /// * `token` - an OAuth2 access token.
    pub fn insert<P, F, T>(&self, object: P, file_path: F, token: T) -> InsertObject
    where
        P: Into<Payload>,
        F: Into<String>,
        T: Into<String>,
    {
        InsertObject::new(self.inner.clone(), object, file_path, token)
    }

    /// Downloads the contents of an object.
    ///
    /// The `Accept` header is the content type guessed from the object name,
    /// or `application/json` if the name has no known extension.
    /// The object contents are in [body][Response::body] exactly as stored,
    /// and decoded into [data][Response::data].
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let response = client.get("my-bucket", "reports/q1.csv", token).await?;
    /// if let Some(text) = response.data.as_text() {
    ///     println!("object contents={text}");
    /// }
    /// # Ok(()) }
    /// ```
    ///
    /// # Parameters
    /// * `bucket` - the bucket name, e.g. `my-bucket`.
    /// * `file_path` - the object name.
    /// * `token` - an OAuth2 access token.
    pub async fn get(&self, bucket: &str, file_path: &str, token: &str) -> Result<Response> {
        super::get_object::get_object(&self.inner, bucket, file_path, token).await
    }

    /// Grants `allUsers` read access to an object or to a whole bucket.
    ///
    /// With a `file_path`, this adds an ACL entry making the object readable
    /// by anyone, and the response data includes a `uri` field with the
    /// public URL of the object. The object name must have a file extension,
    /// names without one are treated as folders and rejected before any
    /// request is sent.
    ///
    /// Without a `file_path`, this sets the IAM policy of the bucket to grant
    /// `roles/storage.objectViewer` to `allUsers`. Note that this replaces
    /// the existing bucket policy.
    ///
    /// The `uri` field is added to [data][Response::data] only,
    /// [body][Response::body] holds the service response as received.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let response = client.make_public("my-bucket", Some("images/cat.png"), token).await?;
    /// let uri = response.data.as_json().and_then(|v| v.get("uri"));
    /// println!("public URL={uri:?}");
    /// # Ok(()) }
    /// ```
    pub async fn make_public(
        &self,
        bucket: &str,
        file_path: Option<&str>,
        token: &str,
    ) -> Result<Response> {
        super::make_public::make_public(&self.inner, bucket, file_path, token).await
    }

    /// Returns a handle to read and update bucket metadata.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let response = client.bucket_config().get("my-bucket", token).await?;
    /// println!("bucket metadata={:?}", response.data);
    /// # Ok(()) }
    /// ```
    pub fn bucket_config(&self) -> BucketConfig {
        BucketConfig::new(self.inner.clone())
    }

    pub(crate) fn new(builder: ClientBuilder) -> Result<Self> {
        let transport = match builder.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new()?),
        };
        let endpoint = builder
            .endpoint
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let inner = StorageInner {
            transport,
            upload_endpoint: builder.upload_endpoint.unwrap_or_else(|| endpoint.clone()),
            endpoint,
            public_endpoint: builder
                .public_endpoint
                .unwrap_or_else(|| DEFAULT_PUBLIC_HOST.to_string()),
        };
        tracing::info!(
            endpoint = %inner.endpoint,
            upload_endpoint = %inner.upload_endpoint,
            public_endpoint = %inner.public_endpoint,
            "created storage client"
        );
        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}

impl StorageInner {
    /// Sends a request through the transport, adding the common headers.
    pub(crate) async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut request = request;
        request.headers.insert(
            "x-goog-api-client",
            HeaderValue::from_static(&info::X_GOOG_API_CLIENT_HEADER),
        );
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }

    /// Sends `body` as the JSON payload of `request`, with bearer
    /// authorization, and normalizes the response.
    pub(crate) async fn send_json<T: Serialize + ?Sized>(
        &self,
        request: HttpRequest,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        let body = serde_json::to_vec(body).map_err(Error::ser)?;
        let mut headers = bearer(token)?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let request = request.with_headers(headers).with_body(body);
        normalize(self.execute(request).await?)
    }
}

/// A builder for [StorageClient].
///
/// ```
/// # use google_cloud_storage_rest::client::StorageClient;
/// # fn sample() -> anyhow::Result<()> {
/// let builder = StorageClient::builder();
/// let client = builder
///     .with_endpoint("https://storage.googleapis.com")
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    pub(crate) endpoint: Option<String>,
    pub(crate) upload_endpoint: Option<String>,
    pub(crate) public_endpoint: Option<String>,
    pub(crate) transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Creates a new client.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = StorageClient::builder().build()?;
    /// # Ok(()) }
    /// ```
    pub fn build(self) -> Result<StorageClient> {
        StorageClient::new(self)
    }

    /// Sets the endpoint for the JSON API.
    ///
    /// All requests use this endpoint, `{endpoint}/storage/v1/...`. Uploads
    /// use it too (`{endpoint}/upload/storage/v1/...`) unless
    /// [with_upload_endpoint()][ClientBuilder::with_upload_endpoint] is set.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = StorageClient::builder()
    ///     .with_endpoint("https://storage.googleapis.com")
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(trim_endpoint(v.into()));
        self
    }

    /// Sets the endpoint for media uploads.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # fn sample() -> anyhow::Result<()> {
    /// let client = StorageClient::builder()
    ///     .with_upload_endpoint("https://uploads.example.com")
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_upload_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.upload_endpoint = Some(trim_endpoint(v.into()));
        self
    }

    /// Sets the endpoint used to compute public object URLs.
    ///
    /// [make_public()][StorageClient::make_public] returns URLs in
    /// `{public_endpoint}/{bucket}/{object}` format. The default is
    /// `https://storage.googleapis.com`.
    pub fn with_public_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.public_endpoint = Some(trim_endpoint(v.into()));
        self
    }

    /// Configures the HTTP transport.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// use google_cloud_storage_rest::transport::ReqwestTransport;
    /// # fn sample() -> anyhow::Result<()> {
    /// let http = reqwest::Client::builder()
    ///     .timeout(std::time::Duration::from_secs(30))
    ///     .build()?;
    /// let client = StorageClient::builder()
    ///     .with_transport(ReqwestTransport::from_client(http))
    ///     .build()?;
    /// # Ok(()) }
    /// ```
    pub fn with_transport<T: HttpTransport + 'static>(mut self, v: T) -> Self {
        self.transport = Some(Arc::new(v));
        self
    }
}

fn trim_endpoint(endpoint: String) -> String {
    endpoint.trim_end_matches('/').to_string()
}

/// The default host used by the service.
const DEFAULT_HOST: &str = "https://www.googleapis.com";

/// The default host for public object URLs.
const DEFAULT_PUBLIC_HOST: &str = "https://storage.googleapis.com";

pub(crate) mod info {
    mod build_info {
        // Generated by `build.rs`.
        include!(concat!(env!("OUT_DIR"), "/build_env.rs"));
    }

    const NAME: &str = env!("CARGO_PKG_NAME");
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    lazy_static::lazy_static! {
        pub(crate) static ref X_GOOG_API_CLIENT_HEADER: String = {
            let rustc = build_info::RUSTC_VERSION;
            let rustc = rustc.strip_prefix("rustc ").unwrap_or(rustc);
            format!("gl-rust/{rustc} gccl/{VERSION} gccl-name/{NAME}")
        };
    }
}
