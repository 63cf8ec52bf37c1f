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
use crate::headers::bearer;
use crate::model::{Response, ResponseData, is_truthy};
use crate::transport::HttpRequest;
use crate::{Error, Result};
use bytes::Bytes;
use http::HeaderMap;
use serde_json::Value;
use std::sync::Arc;

/// Reads and updates bucket metadata.
///
/// Created by
/// [StorageClient::bucket_config()][crate::client::StorageClient::bucket_config].
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::client::StorageClient;
/// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
/// let config = client.bucket_config();
/// let current = config.get("my-bucket", token).await?;
/// println!("current metadata={:?}", current.data);
/// let patch = serde_json::json!({"labels": {"env": "test"}});
/// let updated = config.update("my-bucket", Some(&patch), token).await?;
/// println!("updated metadata={:?}", updated.data);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct BucketConfig {
    inner: Arc<StorageInner>,
}

impl BucketConfig {
    pub(crate) fn new(inner: Arc<StorageInner>) -> Self {
        Self { inner }
    }

    /// Fetches the metadata of a bucket.
    ///
    /// # Parameters
    /// * `bucket` - the bucket name, e.g. `my-bucket`.
    /// * `token` - an OAuth2 access token.
    pub async fn get(&self, bucket: &str, token: &str) -> Result<Response> {
        let bucket = required("bucket", bucket)?;
        let token = required("token", token)?;
        let url = urls::bucket(&self.inner.endpoint, bucket);
        tracing::debug!(bucket, "fetching bucket metadata");
        let request = HttpRequest::get(url).with_headers(bearer(token)?);
        normalize(self.inner.execute(request).await?)
    }

    /// Patches the metadata of a bucket.
    ///
    /// Only the fields present in `config` are changed. If `config` has no
    /// truthy values, e.g. it is `None`, an empty object, or all its fields
    /// are `null`, `false`, `0` or `""`, nothing is sent and the result is a
    /// synthetic `200` response echoing `config`.
    ///
    /// # Example
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let patch = serde_json::json!({"labels": {"env": "prod"}});
    /// let response = client
    ///     .bucket_config()
    ///     .update("my-bucket", Some(&patch), token)
    ///     .await?;
    /// println!("status={}", response.status);
    /// # Ok(()) }
    /// ```
    ///
    /// Typed patches are converted with [serde_json::to_value]:
    /// ```
    /// # use google_cloud_storage_rest::client::StorageClient;
    /// #[derive(serde::Serialize)]
    /// #[serde(rename_all = "camelCase")]
    /// struct Versioning {
    ///     enabled: bool,
    /// }
    /// #[derive(serde::Serialize)]
    /// struct Patch {
    ///     versioning: Versioning,
    /// }
    /// # async fn sample(client: &StorageClient, token: &str) -> anyhow::Result<()> {
    /// let patch = Patch { versioning: Versioning { enabled: true } };
    /// let patch = serde_json::to_value(&patch)?;
    /// let response = client
    ///     .bucket_config()
    ///     .update("my-bucket", Some(&patch), token)
    ///     .await?;
    /// println!("status={}", response.status);
    /// # Ok(()) }
    /// ```
    pub async fn update(
        &self,
        bucket: &str,
        config: Option<&Value>,
        token: &str,
    ) -> Result<Response> {
        let bucket = required("bucket", bucket)?;
        let token = required("token", token)?;
        let empty = Value::Object(Default::default());
        let config = config.unwrap_or(&empty);
        if !has_truthy_values(config) {
            tracing::debug!(bucket, "bucket metadata patch is empty, nothing to send");
            let body = serde_json::to_vec(config).map_err(Error::ser)?;
            return Ok(Response::new(
                NO_OP_STATUS,
                HeaderMap::new(),
                Bytes::from(body),
                ResponseData::Json(config.clone()),
            ));
        }
        let url = urls::bucket(&self.inner.endpoint, bucket);
        tracing::debug!(bucket, "patching bucket metadata");
        self.inner
            .send_json(HttpRequest::patch(url), token, config)
            .await
    }
}

/// The status reported when an update has nothing to send.
const NO_OP_STATUS: u16 = 200;

fn has_truthy_values(config: &Value) -> bool {
    match config {
        Value::Object(map) => map.values().any(is_truthy),
        Value::Array(list) => list.iter().any(is_truthy),
        v => is_truthy(v),
    }
}
