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
use crate::headers::bearer;
use crate::model::Response;
use crate::transport::HttpRequest;
use crate::{Error, Result};
use http::header::{ACCEPT, HeaderValue};

pub(crate) async fn get_object(
    inner: &StorageInner,
    bucket: &str,
    file_path: &str,
    token: &str,
) -> Result<Response> {
    let bucket = required("bucket", bucket)?;
    let file_path = required("file_path", file_path)?;
    let token = required("token", token)?;

    let info = file_info(file_path);
    let mut headers = bearer(token)?;
    headers.insert(
        ACCEPT,
        HeaderValue::from_str(info.content_type_or_default()).map_err(Error::binding)?,
    );

    let url = urls::object_media(&inner.endpoint, bucket, file_path);
    tracing::debug!(bucket, name = file_path, "downloading object");
    let request = HttpRequest::get(url).with_headers(headers);
    normalize(inner.execute(request).await?)
}
