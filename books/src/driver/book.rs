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

//! Operations on one book.

use crate::db;
use crate::driver::{book_error, Driver};
use crate::mapper::to_response;
use crate::model::*;
use iii_iv_core::driver::DriverResult;
use log::{debug, info, warn};
use std::cmp;
use time::Duration;

/// Overwrites the fields of `details` with every field supplied in `request`.  Fields that the
/// request does not carry keep their current values.
fn apply_update(details: &mut BookDetails, request: UpdateBookRequest) {
    let UpdateBookRequest {
        title,
        author,
        publisher,
        publication_year,
        gender,
        quantity_copies,
        available,
    } = request;

    if let Some(title) = title {
        details.title = title;
    }
    if let Some(author) = author {
        details.author = author;
    }
    if let Some(publisher) = publisher {
        details.publisher = publisher;
    }
    if let Some(publication_year) = publication_year {
        details.publication_year = publication_year;
    }
    if let Some(gender) = gender {
        details.gender = gender;
    }
    if let Some(quantity_copies) = quantity_copies {
        details.quantity_copies = quantity_copies;
    }
    if let Some(available) = available {
        details.available = available;
    }
}

impl Driver {
    /// Removes the book `id` within a transaction.
    async fn remove_book(&self, id: BookId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        db::delete_book(tx.ex(), id).await.map_err(|e| book_error(id, e))?;
        tx.commit().await?;
        Ok(())
    }

    /// Merges `request` into the book `id` and persists the result within a transaction.
    async fn merge_book(&self, id: BookId, request: UpdateBookRequest) -> DriverResult<Book> {
        let mut tx = self.db.begin().await?;
        let (id, mut details) =
            db::get_book(tx.ex(), id).await.map_err(|e| book_error(id, e))?.into_parts();
        apply_update(&mut details, request);
        // Timestamps have microsecond resolution and the clock may step backwards.
        let next = details.updated_in + Duration::microseconds(1);
        details.updated_in = cmp::max(self.clock.now_utc(), next);
        let book = db::update_book(tx.ex(), &Book::new(id, details))
            .await
            .map_err(|e| book_error(id, e))?;
        tx.commit().await?;
        Ok(book)
    }

    /// Deletes the book `id`.
    pub(crate) async fn delete_book(self, id: BookId) -> DriverResult<()> {
        debug!("Deleting book {}", id);
        self.remove_book(id)
            .await
            .inspect_err(|e| warn!("Failed to delete book {}: {}", id, e))?;
        info!("Deleted book {}", id);
        Ok(())
    }

    /// Gets the book `id`.
    pub(crate) async fn get_book(self, id: BookId) -> DriverResult<BookResponse> {
        debug!("Fetching book {}", id);
        let mut ex = self.db.ex().await?;
        let book = db::get_book(&mut ex, id).await.map_err(|e| book_error(id, e))?;
        Ok(to_response(book))
    }

    /// Updates the book `id` with the fields supplied in `request` and refreshes its update
    /// timestamp.
    pub(crate) async fn update_book(
        self,
        id: BookId,
        request: UpdateBookRequest,
    ) -> DriverResult<BookResponse> {
        debug!("Updating book {}", id);
        let book = self
            .merge_book(id, request)
            .await
            .inspect_err(|e| warn!("Failed to update book {}: {}", id, e))?;
        info!("Updated book {}", id);
        Ok(to_response(book))
    }
}
