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

//! Helpers to compose request headers.

use crate::{Error, Result};
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};

/// Merges two header maps, the headers in `overrides` win.
///
/// This is a shallow merge: every header name present in `overrides` replaces
/// all the values for that name in `base`. Header names are case-insensitive.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::headers::merge_headers;
/// use http::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
/// let mut base = HeaderMap::new();
/// base.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
/// let mut overrides = HeaderMap::new();
/// overrides.insert("Content-Type", HeaderValue::from_static("text/csv"));
/// let merged = merge_headers(base, overrides);
/// assert_eq!(merged.get(CONTENT_TYPE).unwrap(), "text/csv");
/// ```
pub fn merge_headers(base: HeaderMap, overrides: HeaderMap) -> HeaderMap {
    let mut merged = base;
    let mut current = None;
    for (name, value) in overrides {
        // `HeaderMap::into_iter()` yields the name only for the first value of
        // each header.
        match name {
            Some(name) => {
                merged.insert(name.clone(), value);
                current = Some(name);
            }
            None => {
                if let Some(name) = current.as_ref() {
                    merged.append(name.clone(), value);
                }
            }
        }
    }
    merged
}

/// Formats a bearer token as an `Authorization` header.
pub(crate) fn bearer(token: &str) -> Result<HeaderMap> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(Error::binding)?;
    value.set_sensitive(true);
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}
