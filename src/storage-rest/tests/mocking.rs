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

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use gcs::Result;
    use gcs::client::StorageClient;
    use gcs::model::ResponseData;
    use gcs::transport::{HttpRequest, HttpResponse, HttpTransport};
    use google_cloud_storage_rest as gcs;
    use http::{HeaderMap, HeaderValue, Method};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    mockall::mock! {
        #[derive(Debug)]
        Transport {}
        #[async_trait::async_trait]
        impl HttpTransport for Transport {
            async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        HttpResponse::new(status, headers, Bytes::from(body.to_string()))
    }

    fn client(mock: MockTransport) -> Result<StorageClient> {
        StorageClient::builder().with_transport(mock).build()
    }

    #[tokio::test]
    async fn mock_insert_success() -> anyhow::Result<()> {
        let mut mock = MockTransport::new();
        mock.expect_send().return_once(|r| {
            assert_eq!(r.method, Method::POST);
            assert_eq!(
                r.url,
                "https://www.googleapis.com/upload/storage/v1/b/my-bucket/o?uploadType=media&name=my-object.json"
            );
            Ok(json_response(200, json!({"name": "my-object.json", "size": "7"})))
        });
        let response = client(mock)?
            .insert(json!({"a": 1}), "my-bucket/my-object.json", "token")
            .send()
            .await?;
        assert_eq!(response.status, 200);
        assert_eq!(
            response.data.as_json().and_then(|v| v.get("size")),
            Some(&json!("7"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn mock_insert_fail() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .return_once(|_| Ok(json_response(403, json!({"error": {"code": 403}}))));
        let err = client(mock)
            .expect("client with a mock transport")
            .insert("hello", "my-bucket/my-object.txt", "token")
            .send()
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(403), "{err:?}");
        assert_eq!(err.to_string(), "Internal Server Error");
    }

    #[tokio::test]
    async fn mock_transport_error() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .return_once(|_| Err(gcs::Error::io("connection refused")));
        let err = client(mock)
            .expect("client with a mock transport")
            .get("my-bucket", "my-object.txt", "token")
            .await
            .unwrap_err();
        assert!(err.is_io(), "{err:?}");
        assert_eq!(err.http_status_code(), None, "{err:?}");
    }

    #[tokio::test]
    async fn mock_get_not_found() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .return_once(|_| Ok(json_response(404, json!({"error": {"code": 404}}))));
        let err = client(mock)
            .expect("client with a mock transport")
            .get("bucket", "path/no-ext", "token")
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(404), "{err:?}");
        assert_eq!(err.to_string(), "Object not found");
    }

    #[tokio::test]
    async fn mock_make_public() -> anyhow::Result<()> {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .return_once(|_| Ok(json_response(200, json!({"entity": "allUsers"}))));
        let response = client(mock)?
            .make_public("bucket", Some("file.txt"), "token")
            .await?;
        assert_eq!(
            response.data.as_json().and_then(|v| v.get("uri")),
            Some(&json!("https://storage.googleapis.com/bucket/file.txt"))
        );
        Ok(())
    }

    #[tokio::test]
    async fn no_network_calls() {
        let mut mock = MockTransport::new();
        mock.expect_send().never();
        let client = client(mock).expect("client with a mock transport");

        let err = client
            .make_public("bucket", Some("folder"), "token")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("cannot be made public"), "{err}");

        let err = client.get("bucket", "file.txt", "").await.unwrap_err();
        assert!(err.is_missing_parameter(), "{err:?}");

        let err = client.bucket_config().get("", "token").await.unwrap_err();
        assert!(err.is_missing_parameter(), "{err:?}");

        let response = client
            .bucket_config()
            .update("bucket", Some(&json!({})), "token")
            .await
            .expect("empty updates succeed without a request");
        assert_eq!(response.status, 200);
        assert_eq!(response.data, ResponseData::Json(json!({})));
    }

    /// A transport that records requests and replies with canned responses.
    #[derive(Clone, Debug, Default)]
    struct Recorder {
        requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    #[async_trait::async_trait]
    impl HttpTransport for Recorder {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let status = if request.method == Method::PATCH { 401 } else { 200 };
            self.requests
                .lock()
                .map_err(|e| gcs::Error::io(e.to_string()))?
                .push(request);
            Ok(json_response(status, json!({})))
        }
    }

    #[tokio::test]
    async fn custom_transport() -> anyhow::Result<()> {
        let recorder = Recorder::default();
        let client = StorageClient::builder()
            .with_endpoint("https://private.googleapis.com")
            .with_transport(recorder.clone())
            .build()?;

        client.bucket_config().get("bucket", "token").await?;
        client.make_public("bucket", None, "token").await?;
        let err = client
            .bucket_config()
            .update("bucket", Some(&json!({"location": "US"})), "token")
            .await
            .unwrap_err();
        assert_eq!(err.http_status_code(), Some(401), "{err:?}");
        assert_eq!(err.to_string(), "Access denied");

        let requests = recorder.requests.lock().expect("lock is not poisoned");
        let got = requests
            .iter()
            .map(|r| (r.method.clone(), r.url.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            got,
            vec![
                (Method::GET, "https://private.googleapis.com/storage/v1/b/bucket"),
                (Method::PUT, "https://private.googleapis.com/storage/v1/b/bucket/iam"),
                (Method::PATCH, "https://private.googleapis.com/storage/v1/b/bucket"),
            ]
        );
        for r in requests.iter() {
            let auth = r.headers.get("authorization").and_then(|v| v.to_str().ok());
            assert_eq!(auth, Some("Bearer token"), "{r:?}");
        }
        Ok(())
    }
}
