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

//! Resolve content types from object names.

/// The content type used when the object name has no known extension.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// The extension and content type of an object name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileInfo {
    /// The guessed content type, if the extension is known.
    pub content_type: Option<String>,
    /// The extension of the last path segment, without the leading `.`.
    pub ext: Option<String>,
}

impl FileInfo {
    /// The guessed content type, or [DEFAULT_CONTENT_TYPE].
    pub fn content_type_or_default(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Returns true if the last path segment has an extension.
    pub fn has_extension(&self) -> bool {
        self.ext.is_some()
    }
}

/// Guesses the content type of an object from its name.
///
/// Only the last `/`-separated segment is considered. Names such as
/// `folder`, `folder/` or `.hidden` have no extension.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::content_type::file_info;
/// let info = file_info("my-bucket/images/cat.png");
/// assert_eq!(info.ext.as_deref(), Some("png"));
/// assert_eq!(info.content_type_or_default(), "image/png");
///
/// let info = file_info("my-bucket/images");
/// assert_eq!(info.ext, None);
/// assert_eq!(info.content_type_or_default(), "application/json");
/// ```
pub fn file_info(path: &str) -> FileInfo {
    let last = path.rsplit('/').next().unwrap_or_default();
    let ext = std::path::Path::new(last)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_string);
    let content_type = ext
        .as_deref()
        .and_then(|e| mime_guess::from_ext(e).first())
        .map(|m| m.essence_str().to_string());
    FileInfo { content_type, ext }
}
