// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Generic types shared by the model layer of all services.
//!
//! The model layer holds the data types that represent concepts in the domain of a service.
//! Types that wrap untrusted input should validate it at construction time and report problems
//! with a `ModelError`, so that invalid values cannot exist once they have been built.

/// Model errors.
///
/// The message carried in this error is expected to be user-facing: it is what callers see when
/// they provide a value that violates the contract of a type.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display_is_message() {
        let e = ModelError("Title cannot be empty".to_owned());
        assert_eq!("Title cannot be empty", e.to_string());
    }
}
