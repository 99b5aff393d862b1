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

//! Database abstraction in terms of the operations needed by the server.
//!
//! Every function in this module takes an `Executor`, which may be backed by a pooled connection
//! or by an open transaction.  Transaction boundaries are the responsibility of the caller.

use crate::mapper::to_storage_fields;
use crate::model::{Book, BookDetails, BookId};
use futures::TryStreamExt;
use iii_iv_core::db::postgres;
#[cfg(test)]
use iii_iv_core::db::sqlite;
use iii_iv_core::db::{DbError, DbResult, Executor};
use sqlx::Row;

#[cfg(test)]
mod tests;

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => {
            postgres::run_schema(ex, include_str!("postgres.sql")).await
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Converts a row count as returned by the database into an unsigned quantity.
fn count_to_u64(count: i64) -> DbResult<u64> {
    u64::try_from(count)
        .map_err(|e| DbError::DataIntegrityError(format!("Invalid row count {}: {}", count, e)))
}

/// Inserts a new book with the given `details` and returns the stored record, which carries the
/// identifier assigned by the database.
pub(crate) async fn create_book(ex: &mut Executor, details: &BookDetails) -> DbResult<Book> {
    let fields = to_storage_fields(details);

    match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO books
                    (title, author, publisher, publication_year, gender,
                    quantity_copies, available, updated_in)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(fields.title)
                .bind(fields.author)
                .bind(fields.publisher)
                .bind(fields.publication_year)
                .bind(fields.gender)
                .bind(fields.quantity_copies)
                .bind(fields.available)
                .bind(fields.updated_in)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let (updated_in_secs, updated_in_nsecs) = sqlite::unpack_timestamp(fields.updated_in)?;

            let query_str = "
                INSERT INTO books
                    (title, author, publisher, publication_year, gender,
                    quantity_copies, available, updated_in_secs, updated_in_nsecs)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                RETURNING *
            ";
            let row = sqlx::query(query_str)
                .bind(fields.title)
                .bind(fields.author)
                .bind(fields.publisher)
                .bind(fields.publication_year)
                .bind(fields.gender)
                .bind(fields.quantity_copies)
                .bind(fields.available)
                .bind(updated_in_secs)
                .bind(updated_in_nsecs)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Book::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the book identified by `id`.
pub(crate) async fn get_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM books WHERE id = $1";
            match sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM books WHERE id = ?";
            match sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Counts all books in the catalog.
pub(crate) async fn count_books(ex: &mut Executor) -> DbResult<u64> {
    let count: i64 = match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT COUNT(*) AS total FROM books";
            let row = sqlx::query(query_str)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("total").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT COUNT(*) AS total FROM books";
            let row = sqlx::query(query_str)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("total").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };
    count_to_u64(count)
}

/// Gets a page of at most `limit` books, skipping the first `offset` ones.  Books are sorted by
/// their identifier so that repeated calls over an unchanged catalog return the same pages.
pub(crate) async fn get_books(ex: &mut Executor, limit: u32, offset: u32) -> DbResult<Vec<Book>> {
    let mut books = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM books ORDER BY id ASC LIMIT $1 OFFSET $2";
            let mut rows = sqlx::query(query_str)
                .bind(i64::from(limit))
                .bind(i64::from(offset))
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM books ORDER BY id ASC LIMIT ? OFFSET ?";
            let mut rows = sqlx::query(query_str)
                .bind(i64::from(limit))
                .bind(i64::from(offset))
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                books.push(Book::try_from(row)?);
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
    Ok(books)
}

/// Overwrites every mutable column of the stored record that matches the identifier of `book`
/// and returns the record as stored.
pub(crate) async fn update_book(ex: &mut Executor, book: &Book) -> DbResult<Book> {
    let fields = to_storage_fields(book.details());

    match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE books
                SET title = $1, author = $2, publisher = $3, publication_year = $4, gender = $5,
                    quantity_copies = $6, available = $7, updated_in = $8
                WHERE id = $9
                RETURNING *
            ";
            match sqlx::query(query_str)
                .bind(fields.title)
                .bind(fields.author)
                .bind(fields.publisher)
                .bind(fields.publication_year)
                .bind(fields.gender)
                .bind(fields.quantity_copies)
                .bind(fields.available)
                .bind(fields.updated_in)
                .bind(book.id().as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let (updated_in_secs, updated_in_nsecs) = sqlite::unpack_timestamp(fields.updated_in)?;

            let query_str = "
                UPDATE books
                SET title = ?, author = ?, publisher = ?, publication_year = ?, gender = ?,
                    quantity_copies = ?, available = ?,
                    updated_in_secs = ?, updated_in_nsecs = ?
                WHERE id = ?
                RETURNING *
            ";
            match sqlx::query(query_str)
                .bind(fields.title)
                .bind(fields.author)
                .bind(fields.publisher)
                .bind(fields.publication_year)
                .bind(fields.gender)
                .bind(fields.quantity_copies)
                .bind(fields.available)
                .bind(updated_in_secs)
                .bind(updated_in_nsecs)
                .bind(book.id().as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Deletes the book identified by `id` and returns the record that was removed.
pub(crate) async fn delete_book(ex: &mut Executor, id: BookId) -> DbResult<Book> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM books WHERE id = $1 RETURNING *";
            match sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[cfg(test)]
        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM books WHERE id = ? RETURNING *";
            match sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
            {
                Some(row) => Book::try_from(row),
                None => Err(DbError::NotFound),
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
