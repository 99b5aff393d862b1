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

//! Generic types for the business logic of a service.
//!
//! Services should define a driver type that holds the handles shared across requests (such as
//! the database and the clock) and that exposes one method per operation.  Every operation decides
//! by itself whether it needs a transaction and commits it before returning, so that callers
//! never have to coordinate two separate driver calls.

use crate::db::DbError;

/// Business logic errors.  These errors encapsulate errors from other layers so that the REST
/// layer only has to deal with one error type.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DriverError {
    /// Catch-all error type for unexpected persistence errors.
    #[error("{0}")]
    BackendError(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<DbError> for DriverError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::BackendError(_) => DriverError::BackendError(e.to_string()),
            DbError::DataIntegrityError(_) => DriverError::BackendError(e.to_string()),
            DbError::NotFound => DriverError::NotFound(e.to_string()),
            DbError::Unavailable => DriverError::BackendError(e.to_string()),
        }
    }
}

/// Result type for this module.
pub type DriverResult<T> = Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_db_error_not_found() {
        assert_eq!(
            DriverError::NotFound("Entity not found".to_owned()),
            DriverError::from(DbError::NotFound)
        );
    }

    #[test]
    fn test_from_db_error_everything_else_is_backend() {
        for e in [
            DbError::BackendError("connection reset".to_owned()),
            DbError::DataIntegrityError("bad column".to_owned()),
            DbError::Unavailable,
        ] {
            let message = e.to_string();
            assert_eq!(DriverError::BackendError(message), DriverError::from(e));
        }
    }
}
