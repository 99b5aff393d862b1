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

//! Operations on the collection of books.

use crate::db;
use crate::driver::Driver;
use crate::mapper::{from_create_request, to_response};
use crate::model::*;
use iii_iv_core::driver::DriverResult;
use log::{debug, info, warn};

impl Driver {
    /// Stores a new book with `details` within a transaction.
    async fn insert_book(&self, details: &BookDetails) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let book = db::create_book(tx.ex(), details).await?;
        tx.commit().await?;
        Ok(book)
    }

    /// Adds a new book to the catalog as described by `request`.
    pub(crate) async fn create_book(
        self,
        request: CreateBookRequest,
    ) -> DriverResult<BookResponse> {
        let details = from_create_request(request, self.clock.now_utc());
        debug!("Creating book '{}'", details.title.as_str());
        let book = self
            .insert_book(&details)
            .await
            .inspect_err(|e| warn!("Failed to create book '{}': {}", details.title.as_str(), e))?;
        info!("Created book {}", book.id());
        Ok(to_response(book))
    }

    /// Gets a page of at most `limit` books after skipping `offset` of them, along with the total
    /// number of books in the catalog.
    ///
    /// The count and the page are obtained with two separate queries, so they can disagree if the
    /// catalog is modified concurrently.
    pub(crate) async fn get_books(self, limit: u32, offset: u32) -> DriverResult<BookListResponse> {
        debug!("Listing books with limit={} offset={}", limit, offset);
        let mut ex = self.db.ex().await?;
        let total_count = db::count_books(&mut ex).await?;
        let books = db::get_books(&mut ex, limit, offset).await?;
        Ok(BookListResponse {
            items: books.into_iter().map(to_response).collect(),
            total_count,
            limit,
            offset,
        })
    }
}
