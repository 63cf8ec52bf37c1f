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

use crate::model::{Response, ResponseData};
use crate::transport::HttpResponse;
use crate::{Error, Result};

/// Status codes at or above this value are errors.
const FIRST_ERROR_STATUS: u16 = 400;

/// Converts a raw transport response into a [Response] or an [Error].
pub(crate) fn normalize(response: HttpResponse) -> Result<Response> {
    let HttpResponse {
        status,
        headers,
        body,
    } = response;
    let content_type = headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let data = ResponseData::decode(content_type, body.clone());
    if status >= FIRST_ERROR_STATUS {
        tracing::debug!(status, "the service returned an error");
        return Err(Error::service(status, headers, data));
    }
    Ok(Response::new(status, headers, body, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::tests::json_response;
    use bytes::Bytes;
    use http::HeaderMap;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(200)]
    #[test_case(204)]
    #[test_case(308)]
    #[test_case(399)]
    fn success(status: u16) -> anyhow::Result<()> {
        let response = normalize(json_response(status, json!({"kind": "storage#bucket"})))?;
        assert_eq!(response.status, status);
        assert_eq!(response.data, ResponseData::Json(json!({"kind": "storage#bucket"})));
        assert_eq!(response.body.as_ref(), br#"{"kind":"storage#bucket"}"#);
        Ok(())
    }

    #[test]
    fn body_is_kept_verbatim() -> anyhow::Result<()> {
        let raw = Bytes::from_static(br#"{"z": 1, "a": 2, "n": 12345678901234567890123}"#);
        let mut headers = HeaderMap::new();
        headers.insert(http::header::CONTENT_TYPE, "application/json".parse()?);
        let response = normalize(HttpResponse::new(200, headers, raw.clone()))?;
        assert_eq!(response.body, raw);
        assert!(response.data.as_json().is_some(), "{response:?}");
        Ok(())
    }

    #[test_case(400, "Internal Server Error")]
    #[test_case(401, "Access denied")]
    #[test_case(404, "Object not found")]
    #[test_case(429, "Internal Server Error")]
    #[test_case(500, "Internal Server Error")]
    fn errors(status: u16, message: &str) {
        let body = json!({"error": {"code": status, "message": "details"}});
        let err = normalize(json_response(status, body.clone())).unwrap_err();
        assert_eq!(err.http_status_code(), Some(status), "{err:?}");
        assert_eq!(err.to_string(), message);
        assert_eq!(err.data(), Some(&ResponseData::Json(body)));
    }

    #[test]
    fn text_error_body() {
        let response = HttpResponse::new(502, HeaderMap::new(), Bytes::from_static(b"bad gateway"));
        let err = normalize(response).unwrap_err();
        assert_eq!(err.http_status_code(), Some(502), "{err:?}");
        assert_eq!(err.data(), Some(&ResponseData::Text("bad gateway".to_string())));
    }
}
