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
use super::urls;
use super::validation::required;
use crate::content_type::file_info;
use crate::model::{Response, ResponseData};
use crate::transport::HttpRequest;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

const ALL_USERS: &str = "allUsers";
const OBJECT_READER: &str = "READER";
const BUCKET_OBJECT_VIEWER: &str = "roles/storage.objectViewer";

#[derive(Serialize)]
struct ObjectAccessControl<'a> {
    entity: &'a str,
    role: &'a str,
}

#[derive(Serialize)]
struct Policy<'a> {
    bindings: Vec<Binding<'a>>,
}

#[derive(Serialize)]
struct Binding<'a> {
    role: &'a str,
    members: Vec<&'a str>,
}

pub(crate) async fn make_public(
    inner: &StorageInner,
    bucket: &str,
    file_path: Option<&str>,
    token: &str,
) -> Result<Response> {
    let bucket = required("bucket", bucket)?;
    let token = required("token", token)?;
    match file_path {
        Some(path) => make_object_public(inner, bucket, required("file_path", path)?, token).await,
        None => make_bucket_public(inner, bucket, token).await,
    }
}

async fn make_object_public(
    inner: &StorageInner,
    bucket: &str,
    file_path: &str,
    token: &str,
) -> Result<Response> {
    if !file_info(file_path).has_extension() {
        return Err(Error::not_publishable(file_path));
    }
    let acl = ObjectAccessControl {
        entity: ALL_USERS,
        role: OBJECT_READER,
    };
    let url = urls::object_acl(&inner.endpoint, bucket, file_path);
    tracing::debug!(bucket, name = file_path, "granting public read access to object");
    let mut response = inner.send_json(HttpRequest::post(url), token, &acl).await?;

    let uri = urls::public_object(&inner.public_endpoint, bucket, file_path);
    let mut data = match response.data {
        ResponseData::Json(Value::Object(map)) => map,
        _ => Map::new(),
    };
    data.insert("uri".to_string(), Value::String(uri));
    response.data = ResponseData::Json(Value::Object(data));
    Ok(response)
}

async fn make_bucket_public(inner: &StorageInner, bucket: &str, token: &str) -> Result<Response> {
    let policy = Policy {
        bindings: vec![Binding {
            role: BUCKET_OBJECT_VIEWER,
            members: vec![ALL_USERS],
        }],
    };
    let url = urls::bucket_iam(&inner.endpoint, bucket);
    tracing::debug!(bucket, "granting public read access to bucket");
    inner.send_json(HttpRequest::put(url), token, &policy).await
}
