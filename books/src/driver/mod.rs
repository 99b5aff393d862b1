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

//! Business logic for the service.

use crate::model::BookId;
use iii_iv_core::clocks::Clock;
use iii_iv_core::db::{Db, DbError};
use iii_iv_core::driver::DriverError;
use std::sync::Arc;

mod book;
mod books;
#[cfg(test)]
pub(crate) mod testutils;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": the mutating ones start and
/// commit a transaction, so it's incorrect for the caller to use two separate calls.  For this
/// reason, these operations consume the driver in an attempt to minimize the possibility of
/// executing two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used to stamp the records on every mutation.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

/// Converts a database error `e` raised while handling the book `id` into a driver error,
/// describing which book was missing if that was the problem.
fn book_error(id: BookId, e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("Book with ID {} does not exist", id)),
        e => DriverError::from(e),
    }
}
