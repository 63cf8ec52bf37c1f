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

//! Errors returned by the storage client.
//!
//! All operations return [Error]. Use the `is_*()` predicates to classify the
//! error, and [Error::http_status_code()] and [Error::data()] to examine
//! errors reported by the service.

use crate::model::ResponseData;
use http::HeaderMap;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The error type for the storage client.
///
/// # Example
/// ```
/// # use google_cloud_storage_rest::Error;
/// fn report(error: &Error) {
///     if let Some(code) = error.http_status_code() {
///         println!("the service rejected the request with {code}: {error}");
///     } else if error.is_missing_parameter() {
///         println!("fix the caller: {error}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// Creates an error representing a required parameter that was empty.
    ///
    /// # Example
    /// ```
    /// use google_cloud_storage_rest::Error;
    /// let error = Error::missing_parameter("bucket");
    /// assert!(error.is_missing_parameter());
    /// assert_eq!(error.parameter(), Some("bucket"));
    /// ```
    pub fn missing_parameter(name: &'static str) -> Self {
        Self {
            kind: ErrorKind::MissingParameter(name),
            source: None,
        }
    }

    /// A required parameter was empty, the request was never sent.
    ///
    /// # Troubleshooting
    ///
    /// This is a programming error in the caller. Retrying the request with the
    /// same arguments will fail in the same way.
    pub fn is_missing_parameter(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingParameter(_))
    }

    /// The name of the missing parameter, if this is a
    /// [missing parameter][Error::is_missing_parameter] error.
    pub fn parameter(&self) -> Option<&'static str> {
        match &self.kind {
            ErrorKind::MissingParameter(name) => Some(name),
            _ => None,
        }
    }

    /// Creates an error for a path that cannot be made public.
    ///
    /// # Example
    /// ```
    /// use google_cloud_storage_rest::Error;
    /// let error = Error::not_publishable("images");
    /// assert!(error.is_not_publishable());
    /// assert!(error.to_string().contains("cannot be made public"));
    /// ```
    pub fn not_publishable<T: Into<String>>(path: T) -> Self {
        Self {
            kind: ErrorKind::NotPublishable(path.into()),
            source: None,
        }
    }

    /// The path given to [make_public()] has no file extension.
    ///
    /// Object names without an extension are treated as folders, and folders
    /// cannot be made public. The request was never sent.
    ///
    /// [make_public()]: crate::client::StorageClient::make_public
    pub fn is_not_publishable(&self) -> bool {
        matches!(self.kind, ErrorKind::NotPublishable(_))
    }

    /// Creates an error representing a malformed request parameter.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use google_cloud_storage_rest::Error;
    /// let error = Error::binding("object path is missing the object name");
    /// assert!(error.is_binding());
    /// assert!(error.source().is_some());
    /// ```
    pub fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Binding,
            source: Some(source.into()),
        }
    }

    /// A request parameter could not be used to build the request.
    ///
    /// This is always a client-side generated error, the request was never
    /// sent. Examples include object paths without an object name, or tokens
    /// that contain characters not allowed in HTTP headers.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// Creates an error representing a serialization problem.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use google_cloud_storage_rest::Error;
    /// let error = Error::ser("simulated problem");
    /// assert!(error.is_serialization());
    /// assert!(error.source().is_some());
    /// ```
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request payload could not be serialized.
    ///
    /// This is always a client-side generated error, generated before the
    /// request is made.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error representing a problem in the HTTP transport.
    ///
    /// # Example
    /// ```
    /// use std::error::Error as _;
    /// use google_cloud_storage_rest::Error;
    /// let error = Error::io("connection reset");
    /// assert!(error.is_io());
    /// assert!(error.source().is_some());
    /// ```
    pub fn io<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Io,
            source: Some(source.into()),
        }
    }

    /// The transport could not send the request or receive the response.
    ///
    /// The request may or may not have reached the service.
    pub fn is_io(&self) -> bool {
        matches!(self.kind, ErrorKind::Io)
    }

    /// Creates an error with the information returned by the service.
    ///
    /// # Example
    /// ```
    /// use google_cloud_storage_rest::Error;
    /// use google_cloud_storage_rest::model::ResponseData;
    /// let error = Error::service(404, http::HeaderMap::new(), ResponseData::Empty);
    /// assert_eq!(error.http_status_code(), Some(404));
    /// assert_eq!(error.to_string(), "Object not found");
    /// ```
    pub fn service(status_code: u16, headers: HeaderMap, data: ResponseData) -> Self {
        let details = ServiceDetails {
            status_code,
            headers,
            data,
        };
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source: None,
        }
    }

    /// The service responded with an HTTP status code of 400 or higher.
    ///
    /// The message of these errors depends only on the status code: `404` is
    /// reported as `Object not found`, `401` as `Access denied`, and any other
    /// code as `Internal Server Error`. Use [http_status_code()] and [data()]
    /// for the details.
    ///
    /// [http_status_code()]: Error::http_status_code
    /// [data()]: Error::data
    pub fn is_service(&self) -> bool {
        matches!(self.kind, ErrorKind::Service(_))
    }

    /// The HTTP status code, if any, associated with this error.
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Service(d) => Some(d.status_code),
            _ => None,
        }
    }

    /// The response headers, if any, associated with this error.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.headers),
            _ => None,
        }
    }

    /// The response body, if any, associated with this error.
    ///
    /// Cloud Storage typically returns a JSON object with an `error` field
    /// describing the problem in more detail than the [Display] message.
    ///
    /// [Display]: std::fmt::Display
    pub fn data(&self) -> Option<&ResponseData> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.data),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::MissingParameter(name), _) => {
                write!(f, "configuration error: missing required parameter `{name}`")
            }
            (ErrorKind::NotPublishable(path), _) => write!(
                f,
                "`{path}` cannot be made public, only objects with a file extension can be made public"
            ),
            (ErrorKind::Binding, Some(e)) => write!(f, "cannot build the request {e}"),
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Io, Some(e)) => write!(f, "the HTTP transport reports an error: {e}"),
            (ErrorKind::Service(d), _) => write!(f, "{}", service_message(d.status_code)),
            (_, None) => unreachable!("no constructor allows this"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// The message reported for service errors.
///
/// Only 404 and 401 have their own messages, everything else collapses to a
/// generic message.
fn service_message(status_code: u16) -> &'static str {
    match status_code {
        404 => "Object not found",
        401 => "Access denied",
        _ => "Internal Server Error",
    }
}

#[derive(Debug)]
enum ErrorKind {
    MissingParameter(&'static str),
    NotPublishable(String),
    Binding,
    Serialization,
    Io,
    Service(Box<ServiceDetails>),
}

#[derive(Debug)]
struct ServiceDetails {
    status_code: u16,
    headers: HeaderMap,
    data: ResponseData,
}
