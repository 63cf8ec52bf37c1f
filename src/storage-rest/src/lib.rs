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

//! Google Cloud Client Libraries for Rust - Storage JSON API
//!
//! This crate contains a small client for the [Google Cloud Storage] JSON API.
//! It covers a handful of operations:
//!
//! * uploading an object with a single-shot media upload,
//! * downloading the contents of an object,
//! * reading and patching the metadata of a bucket,
//! * granting public read access to an object or a bucket.
//!
//! Most applications will use [StorageClient][client::StorageClient]. The
//! caller provides an OAuth2 access token with each request, this crate does
//! not acquire or refresh tokens. There are no retries either: each call makes
//! at most one HTTP request.
//!
//! # Example
//! ```no_run
//! # use google_cloud_storage_rest::client::StorageClient;
//! # async fn sample(token: &str) -> anyhow::Result<()> {
//! let client = StorageClient::builder().build()?;
//! let response = client
//!     .insert("hello world", "my-bucket/greetings/hello.txt", token)
//!     .send()
//!     .await?;
//! println!("status={}, data={:?}", response.status, response.data);
//! # Ok(()) }
//! ```
//!
//! [Google Cloud Storage]: https://cloud.google.com/storage

pub use error::Error;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

pub mod content_type;
pub mod error;
pub mod headers;
pub mod model;
pub mod transport;

mod storage;

/// Clients to interact with Google Cloud Storage.
pub mod client {
    pub use crate::storage::client::{ClientBuilder, StorageClient};
}

/// Request builders.
pub mod builder {
    pub use crate::storage::bucket_config::BucketConfig;
    pub use crate::storage::insert_object::InsertObject;
}
