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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use iii_iv_core::clocks::testutils::MonotonicClock;
use iii_iv_core::db::{Db, DbError, Executor};
use std::sync::Arc;

/// State of a running test for the REST layer.
pub(crate) struct TestContext {
    /// The database backing the app.
    db: Arc<dyn Db + Send + Sync>,

    /// The router under test.
    app: Router,
}

impl TestContext {
    /// Initializes an app backed by an in-memory database and a fake clock.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> =
            Arc::from(iii_iv_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(MonotonicClock::new(1_000_000));
        let driver = Driver::new(db.clone(), clock);
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a copy of the router under test.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the router under test.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Stores a book with `details` directly in the database.
    pub(crate) async fn insert(&self, details: BookDetails) -> Book {
        db::create_book(&mut self.db.ex().await.unwrap(), &details).await.unwrap()
    }

    /// Gets the book `id` directly from the database, if it exists.
    pub(crate) async fn get_book(&self, id: BookId) -> Option<Book> {
        match db::get_book(&mut self.db.ex().await.unwrap(), id).await {
            Ok(book) => Some(book),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("Failed to query book {}: {}", id, e),
        }
    }

    /// Drops the books table so that every further database operation fails.
    pub(crate) async fn break_db(&self) {
        match self.db.ex().await.unwrap() {
            Executor::Sqlite(mut ex) => {
                sqlx::query("DROP TABLE books").execute(ex.conn()).await.unwrap();
            }

            #[allow(unused)]
            _ => unreachable!(),
        }
    }

    /// Counts the books stored in the database.
    pub(crate) async fn count(&self) -> u64 {
        db::count_books(&mut self.db.ex().await.unwrap()).await.unwrap()
    }
}
