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

//! The HTTP transport used by the storage client.
//!
//! The client sends all its requests through an [HttpTransport]. Applications
//! rarely need to change the default [ReqwestTransport], but a custom
//! transport can route requests through a proxy, record them, or serve them
//! from a test double.

use crate::{Error, Result};
use bytes::Bytes;
use http::{HeaderMap, Method};

/// A single HTTP request.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a request without headers or body.
    pub fn new<U: Into<String>>(method: Method, url: U) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get<U: Into<String>>(url: U) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a `POST` request.
    pub fn post<U: Into<String>>(url: U) -> Self {
        Self::new(Method::POST, url)
    }

    /// Creates a `PUT` request.
    pub fn put<U: Into<String>>(url: U) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Creates a `PATCH` request.
    pub fn patch<U: Into<String>>(url: U) -> Self {
        Self::new(Method::PATCH, url)
    }

    /// Sets the request headers.
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    pub fn with_body<B: Into<Bytes>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// A raw HTTP response, before any error normalization.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The value of the `content-type` header, if present and valid.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }
}

/// Sends HTTP requests on behalf of the storage client.
///
/// Implementations must return `Ok` for any response received from the
/// service, regardless of its status code. The client maps status codes to
/// errors. Use [Error::io] for requests that could not be sent or responses
/// that could not be received.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::transport::{HttpRequest, HttpResponse, HttpTransport};
/// # use google_cloud_storage_rest::Result;
/// #[derive(Debug)]
/// struct AlwaysNotFound;
///
/// #[async_trait::async_trait]
/// impl HttpTransport for AlwaysNotFound {
///     async fn send(&self, _request: HttpRequest) -> Result<HttpResponse> {
///         Ok(HttpResponse::new(404, http::HeaderMap::new(), bytes::Bytes::new()))
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait HttpTransport: std::fmt::Debug + Send + Sync {
    /// Sends `request` and waits for the full response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// The default transport, based on [reqwest].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a new connection pool.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            // Object downloads return the stored bytes. Disable all automatic
            // decompression, otherwise `gzip`-encoded objects would be
            // silently transformed.
            .no_brotli()
            .no_deflate()
            .no_gzip()
            .no_zstd()
            .build()
            .map_err(Error::io)?;
        Ok(Self { client })
    }

    /// Creates a transport from an existing [reqwest::Client].
    ///
    /// Use this to share a connection pool, or to configure timeouts and
    /// proxies.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        let builder = request.body.into_iter().fold(builder, |b, v| b.body(v));
        let response = builder.send().await.map_err(Error::io)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::io)?;
        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use httptest::{Expectation, Server, matchers::*, responders::status_code};

    type TestResult = anyhow::Result<()>;

    mockall::mock! {
        #[derive(Debug)]
        pub(crate) Transport {}
        #[async_trait::async_trait]
        impl HttpTransport for Transport {
            async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    /// A JSON response for the mocks.
    pub(crate) fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json; charset=UTF-8"),
        );
        HttpResponse::new(status, headers, Bytes::from(body.to_string()))
    }

    #[test]
    fn request_builders() {
        let request = HttpRequest::get("https://example.com/a");
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.url, "https://example.com/a");
        assert!(request.headers.is_empty(), "{request:?}");
        assert!(request.body.is_none(), "{request:?}");

        assert_eq!(HttpRequest::post("u").method, Method::POST);
        assert_eq!(HttpRequest::put("u").method, Method::PUT);
        assert_eq!(HttpRequest::patch("u").method, Method::PATCH);

        let request = HttpRequest::post("u").with_body("payload");
        assert_eq!(request.body.as_deref(), Some(b"payload".as_ref()));
    }

    #[test]
    fn response_content_type() {
        let response = json_response(200, serde_json::json!({}));
        assert_eq!(
            response.content_type(),
            Some("application/json; charset=UTF-8")
        );
        assert_eq!(HttpResponse::default().content_type(), None);
    }

    #[tokio::test]
    async fn reqwest_send() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("PATCH", "/storage/v1/b/test-bucket"),
                request::headers(contains(("x-test-header", "test-value"))),
                request::body("request-body"),
            ])
            .respond_with(
                status_code(200)
                    .append_header("content-type", "text/plain")
                    .body("response-body"),
            ),
        );

        let transport = ReqwestTransport::new()?;
        let mut headers = HeaderMap::new();
        headers.insert("x-test-header", http::HeaderValue::from_static("test-value"));
        let request = HttpRequest::patch(format!(
            "http://{}/storage/v1/b/test-bucket",
            server.addr()
        ))
        .with_headers(headers)
        .with_body("request-body");
        let response = transport.send(request).await?;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("text/plain"));
        assert_eq!(response.body.as_ref(), b"response-body");
        Ok(())
    }

    #[tokio::test]
    async fn reqwest_error_status_is_ok() -> TestResult {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing"))
                .respond_with(status_code(404).body("not found")),
        );

        let transport = ReqwestTransport::new()?;
        let request = HttpRequest::get(format!("http://{}/missing", server.addr()));
        let response = transport.send(request).await?;
        assert_eq!(response.status, 404);
        assert_eq!(response.body.as_ref(), b"not found");
        Ok(())
    }

    #[tokio::test]
    async fn reqwest_io_error() -> TestResult {
        let transport = ReqwestTransport::from_client(reqwest::Client::new());
        // Nothing listens on this port, the connection is refused.
        let request = HttpRequest::get("http://127.0.0.1:1/storage/v1/b/test-bucket");
        let err = transport.send(request).await.unwrap_err();
        assert!(err.is_io(), "{err:?}");
        Ok(())
    }
}
