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

//! URL templates for the Cloud Storage JSON API.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// The set of characters that are percent encoded.
///
/// This set is defined at https://cloud.google.com/storage/docs/request-endpoints#encoding:
///
/// Encode the following characters when they appear in either the object name
/// or query string of a request URL:
///     !, #, $, &, ', (, ), *, +, ,, /, :, ;, =, ?, @, [, ], and space characters.
const ENCODED_CHARS: AsciiSet = CONTROLS
    .add(b'!')
    .add(b'#')
    .add(b'$')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b' ')
    .add(b'%');

/// Same as [ENCODED_CHARS], but `/` separates path segments in public URLs.
const PUBLIC_PATH_CHARS: AsciiSet = ENCODED_CHARS.remove(b'/');

/// Percent encode a string.
pub(crate) fn enc(value: &str) -> String {
    utf8_percent_encode(value, &ENCODED_CHARS).to_string()
}

/// `POST` target for single-shot media uploads.
pub(crate) fn upload_object(endpoint: &str, bucket: &str, name: &str) -> String {
    format!(
        "{endpoint}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
        enc(bucket),
        enc(name)
    )
}

/// `GET` and `PATCH` target for bucket metadata.
pub(crate) fn bucket(endpoint: &str, bucket: &str) -> String {
    format!("{endpoint}/storage/v1/b/{}", enc(bucket))
}

/// `GET` target for the object contents.
pub(crate) fn object_media(endpoint: &str, bucket: &str, object: &str) -> String {
    format!(
        "{endpoint}/storage/v1/b/{}/o/{}?alt=media",
        enc(bucket),
        enc(object)
    )
}

/// `POST` target to add an object ACL entry.
pub(crate) fn object_acl(endpoint: &str, bucket: &str, object: &str) -> String {
    format!(
        "{endpoint}/storage/v1/b/{}/o/{}/acl",
        enc(bucket),
        enc(object)
    )
}

/// `PUT` target for the bucket IAM policy.
pub(crate) fn bucket_iam(endpoint: &str, bucket: &str) -> String {
    format!("{endpoint}/storage/v1/b/{}/iam", enc(bucket))
}

/// The URL to download a public object without authentication.
pub(crate) fn public_object(public_endpoint: &str, bucket: &str, object: &str) -> String {
    format!(
        "{public_endpoint}/{}/{}",
        enc(bucket),
        utf8_percent_encode(object, &PUBLIC_PATH_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const ENDPOINT: &str = "https://www.googleapis.com";

    #[test_case("plain", "plain"; "plain")]
    #[test_case("a/b/c.txt", "a%2Fb%2Fc.txt"; "slashes")]
    #[test_case("with space", "with%20space"; "space")]
    #[test_case("q?a=b&c", "q%3Fa%3Db%26c"; "query characters")]
    #[test_case("100%", "100%25"; "percent")]
    #[test_case("résumé.pdf", "r%C3%A9sum%C3%A9.pdf"; "non ascii")]
    #[test_case("keep-_.~", "keep-_.~"; "unreserved")]
    fn encoding(input: &str, want: &str) {
        assert_eq!(enc(input), want);
    }

    #[test]
    fn templates() {
        assert_eq!(
            upload_object(ENDPOINT, "bucket", "dir/file.txt"),
            "https://www.googleapis.com/upload/storage/v1/b/bucket/o?uploadType=media&name=dir%2Ffile.txt"
        );
        assert_eq!(
            bucket(ENDPOINT, "bucket"),
            "https://www.googleapis.com/storage/v1/b/bucket"
        );
        assert_eq!(
            object_media(ENDPOINT, "bucket", "dir/file.txt"),
            "https://www.googleapis.com/storage/v1/b/bucket/o/dir%2Ffile.txt?alt=media"
        );
        assert_eq!(
            object_acl(ENDPOINT, "bucket", "file.txt"),
            "https://www.googleapis.com/storage/v1/b/bucket/o/file.txt/acl"
        );
        assert_eq!(
            bucket_iam(ENDPOINT, "bucket"),
            "https://www.googleapis.com/storage/v1/b/bucket/iam"
        );
    }

    #[test]
    fn public_urls() {
        let endpoint = "https://storage.googleapis.com";
        assert_eq!(
            public_object(endpoint, "bucket", "file.txt"),
            "https://storage.googleapis.com/bucket/file.txt"
        );
        assert_eq!(
            public_object(endpoint, "bucket", "a/b c/file.txt"),
            "https://storage.googleapis.com/bucket/a/b%20c/file.txt"
        );
    }
}
