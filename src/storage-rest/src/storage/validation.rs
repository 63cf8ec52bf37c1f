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

use crate::{Error, Result};

/// Rejects empty values for required parameters.
///
/// Every operation calls this before building its request, so a missing
/// parameter never reaches the transport.
pub(crate) fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        return Err(Error::missing_parameter(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values() -> anyhow::Result<()> {
        assert_eq!(required("bucket", "my-bucket")?, "my-bucket");
        Ok(())
    }

    #[test]
    fn rejects_empty() {
        let err = required("bucket", "").unwrap_err();
        assert!(err.is_missing_parameter(), "{err:?}");
        assert_eq!(err.parameter(), Some("bucket"));
    }
}
