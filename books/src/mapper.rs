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

//! Conversions between the wire, domain, and storage representations of a book.
//!
//! Every function in this module is pure: none of them talk to the database or to a clock.

use crate::model::*;
use iii_iv_core::db::postgres;
#[cfg(test)]
use iii_iv_core::db::sqlite::{self, build_timestamp};
use iii_iv_core::db::{DbError, DbResult};
use sqlx::postgres::PgRow;
#[cfg(test)]
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use time::OffsetDateTime;

/// Column values of a book in the order in which the database layer binds them.
///
/// This never carries the identifier of the book: the database assigns it on insertion and the
/// caller binds it separately as the match key on updates.
pub(crate) struct StorageFields<'a> {
    /// Value for the `title` column.
    pub(crate) title: &'a str,

    /// Value for the `author` column.
    pub(crate) author: &'a str,

    /// Value for the `publisher` column.
    pub(crate) publisher: &'a str,

    /// Value for the `publication_year` column.
    pub(crate) publication_year: i32,

    /// Value for the `gender` column.
    pub(crate) gender: &'a str,

    /// Value for the `quantity_copies` column.
    pub(crate) quantity_copies: i32,

    /// Value for the `available` column.
    pub(crate) available: bool,

    /// Value for the `updated_in` column (or columns, in SQLite).
    pub(crate) updated_in: OffsetDateTime,
}

/// Builds the domain contents of a book out of the raw values of a row.
#[allow(clippy::too_many_arguments)]
fn details_from_columns(
    title: String,
    author: String,
    publisher: String,
    publication_year: i32,
    gender: String,
    quantity_copies: i32,
    available: bool,
    updated_in: OffsetDateTime,
) -> DbResult<BookDetails> {
    Ok(BookDetails {
        title: Title::new(title)?,
        author,
        publisher,
        publication_year,
        gender,
        quantity_copies: QuantityCopies::from_i32(quantity_copies)?,
        available,
        updated_in,
    })
}

impl TryFrom<PgRow> for Book {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(postgres::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(postgres::map_sqlx_error)?;
        let publisher: String = row.try_get("publisher").map_err(postgres::map_sqlx_error)?;
        let publication_year: i32 =
            row.try_get("publication_year").map_err(postgres::map_sqlx_error)?;
        let gender: String = row.try_get("gender").map_err(postgres::map_sqlx_error)?;
        let quantity_copies: i32 =
            row.try_get("quantity_copies").map_err(postgres::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(postgres::map_sqlx_error)?;
        let updated_in: OffsetDateTime =
            row.try_get("updated_in").map_err(postgres::map_sqlx_error)?;

        let details = details_from_columns(
            title,
            author,
            publisher,
            publication_year,
            gender,
            quantity_copies,
            available,
            updated_in,
        )?;
        Ok(Book::new(BookId::new(id), details))
    }
}

#[cfg(test)]
impl TryFrom<SqliteRow> for Book {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let title: String = row.try_get("title").map_err(sqlite::map_sqlx_error)?;
        let author: String = row.try_get("author").map_err(sqlite::map_sqlx_error)?;
        let publisher: String = row.try_get("publisher").map_err(sqlite::map_sqlx_error)?;
        let publication_year: i32 =
            row.try_get("publication_year").map_err(sqlite::map_sqlx_error)?;
        let gender: String = row.try_get("gender").map_err(sqlite::map_sqlx_error)?;
        let quantity_copies: i32 =
            row.try_get("quantity_copies").map_err(sqlite::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(sqlite::map_sqlx_error)?;
        let updated_in_secs: i64 =
            row.try_get("updated_in_secs").map_err(sqlite::map_sqlx_error)?;
        let updated_in_nsecs: i64 =
            row.try_get("updated_in_nsecs").map_err(sqlite::map_sqlx_error)?;

        let details = details_from_columns(
            title,
            author,
            publisher,
            publication_year,
            gender,
            quantity_copies,
            available,
            build_timestamp(updated_in_secs, updated_in_nsecs)?,
        )?;
        Ok(Book::new(BookId::new(id), details))
    }
}

/// Extracts the column values to persist for the book `details`.
pub(crate) fn to_storage_fields(details: &BookDetails) -> StorageFields<'_> {
    StorageFields {
        title: details.title.as_str(),
        author: &details.author,
        publisher: &details.publisher,
        publication_year: details.publication_year,
        gender: &details.gender,
        quantity_copies: details.quantity_copies.as_i32(),
        available: details.available,
        updated_in: details.updated_in,
    }
}

/// Turns a creation `request` into the contents of a book that has not been stored yet, marking
/// it as updated at `now`.
///
/// The request is not validated again: its fields were validated when it was deserialized.
pub(crate) fn from_create_request(request: CreateBookRequest, now: OffsetDateTime) -> BookDetails {
    BookDetails {
        title: request.title,
        author: request.author,
        publisher: request.publisher,
        publication_year: request.publication_year,
        gender: request.gender,
        quantity_copies: request.quantity_copies,
        available: request.available,
        updated_in: now,
    }
}

/// Turns a stored `book` into its representation for callers.
pub(crate) fn to_response(book: Book) -> BookResponse {
    let (id, details) = book.into_parts();
    BookResponse {
        id,
        title: details.title.into(),
        author: details.author,
        publisher: details.publisher,
        publication_year: details.publication_year,
        gender: details.gender,
        quantity_copies: details.quantity_copies.as_u32(),
        available: details.available,
        updated_in: details.updated_in,
    }
}


#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use iii_iv_core::clocks::testutils::utc_datetime;

    #[test]
    fn test_from_create_request_copies_fields_verbatim() {
        let now = utc_datetime(2023, 5, 12, 8, 30, 0);
        let details = from_create_request(dune_request(), now);
        assert_eq!(
            BookDetails {
                title: Title::new("Dune").unwrap(),
                author: "Herbert".to_owned(),
                publisher: "Ace".to_owned(),
                publication_year: 1965,
                gender: "SciFi".to_owned(),
                quantity_copies: QuantityCopies::new(3).unwrap(),
                available: true,
                updated_in: now,
            },
            details
        );
    }

    #[test]
    fn test_to_storage_fields_order_and_values() {
        let details = numbered_details(4);
        let fields = to_storage_fields(&details);
        assert_eq!("Title 4", fields.title);
        assert_eq!("Author 4", fields.author);
        assert_eq!("Publisher 4", fields.publisher);
        assert_eq!(1904, fields.publication_year);
        assert_eq!("Essay", fields.gender);
        assert_eq!(4, fields.quantity_copies);
        assert!(fields.available);
        assert_eq!(details.updated_in, fields.updated_in);
    }

    #[test]
    fn test_to_response_exposes_full_record() {
        let details = numbered_details(3);
        let updated_in = details.updated_in;
        let response = to_response(Book::new(BookId::new(17), details));
        assert_eq!(
            BookResponse {
                id: BookId::new(17),
                title: "Title 3".to_owned(),
                author: "Author 3".to_owned(),
                publisher: "Publisher 3".to_owned(),
                publication_year: 1903,
                gender: "Essay".to_owned(),
                quantity_copies: 3,
                available: false,
                updated_in,
            },
            response
        );
    }

    #[test]
    fn test_to_response_serializes_rfc3339() {
        let now = utc_datetime(2023, 5, 12, 8, 30, 15);
        let book = Book::new(BookId::new(1), from_create_request(dune_request(), now));
        let json = serde_json::to_value(to_response(book)).unwrap();
        assert_eq!(1, json["id"]);
        assert_eq!("2023-05-12T08:30:15Z", json["updated_in"]);
    }

    #[test]
    fn test_details_from_columns_rejects_invalid_values() {
        let now = utc_datetime(2023, 5, 12, 8, 30, 0);
        let err = details_from_columns(
            "".to_owned(),
            "a".to_owned(),
            "p".to_owned(),
            2000,
            "g".to_owned(),
            1,
            true,
            now,
        )
        .unwrap_err();
        assert_eq!(DbError::DataIntegrityError("Title cannot be empty".to_owned()), err);

        let err = details_from_columns(
            "t".to_owned(),
            "a".to_owned(),
            "p".to_owned(),
            2000,
            "g".to_owned(),
            -1,
            true,
            now,
        )
        .unwrap_err();
        match err {
            DbError::DataIntegrityError(msg) => assert!(msg.contains("negative")),
            e => panic!("Unexpected error {:?}", e),
        }
    }
}
