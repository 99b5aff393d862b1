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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use iii_iv_core::clocks::testutils::MonotonicClock;
use iii_iv_core::db::{Db, Executor};
use std::sync::Arc;
use time::OffsetDateTime;

/// Seconds since the epoch of the first reading of the test clock.
const START_SECS: u64 = 1_000_000;

/// State of a running test for the business layer.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver backed by an in-memory database and a fake clock.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::from(iii_iv_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(MonotonicClock::new(START_SECS));
        let driver = Driver::new(db.clone(), clock);
        Self { db, driver }
    }

    /// Returns the first timestamp that the driver's clock hands out.
    pub(crate) fn start_time(&self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(START_SECS as i64).unwrap()
    }

    /// Obtains a direct executor against the test database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Stores a book with `details` directly in the database, bypassing the driver.
    pub(crate) async fn insert(&self, details: BookDetails) -> Book {
        db::create_book(&mut self.ex().await, &details).await.unwrap()
    }
}
