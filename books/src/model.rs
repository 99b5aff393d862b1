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

//! High-level data types.

use derive_getters::Getters;
use derive_more::{Constructor, Display};
use iii_iv_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

/// Identifier of a book as assigned by the storage layer on insertion.
#[derive(Clone, Constructor, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct BookId(i64);

impl BookId {
    /// Returns the identifier as an `i64`, which is the representation used in the database.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

/// Title of a book, which cannot be empty.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "String", into = "String")]
pub(crate) struct Title(String);

impl Title {
    /// Creates a new title after validating that it is not empty.
    pub(crate) fn new<S: Into<String>>(title: S) -> ModelResult<Self> {
        let title = title.into();
        if title.is_empty() {
            return Err(ModelError("Title cannot be empty".to_owned()));
        }
        Ok(Self(title))
    }

    /// Returns a string view of the title.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = ModelError;

    fn try_from(value: String) -> ModelResult<Self> {
        Title::new(value)
    }
}

impl From<Title> for String {
    fn from(value: Title) -> Self {
        value.0
    }
}

/// Number of copies of a book that the library owns.  We store this as an u32 but guarantee that
/// it is usable in an i32 context because the PostgreSQL database backend needs it.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(try_from = "i64", into = "u32")]
pub(crate) struct QuantityCopies(u32);

impl QuantityCopies {
    /// Creates a quantity from a `u32` with range validation.
    pub(crate) fn new(quantity: u32) -> ModelResult<Self> {
        match i32::try_from(quantity) {
            Ok(_) => Ok(Self(quantity)),
            Err(e) => Err(ModelError(format!("Quantity of copies cannot be represented: {}", e))),
        }
    }

    /// Creates a quantity from an `i32` with range validation.
    pub(crate) fn from_i32(quantity: i32) -> ModelResult<Self> {
        match u32::try_from(quantity) {
            Ok(quantity) => Ok(Self(quantity)),
            Err(_) => {
                Err(ModelError(format!("Quantity of copies cannot be negative: {}", quantity)))
            }
        }
    }

    /// Returns the quantity as an `i32`.
    pub(crate) fn as_i32(&self) -> i32 {
        i32::try_from(self.0).expect("i32 compatibility validated at construction time")
    }

    /// Returns the quantity as a `u32`.
    pub(crate) fn as_u32(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for QuantityCopies {
    type Error = ModelError;

    fn try_from(value: i64) -> ModelResult<Self> {
        if value < 0 {
            return Err(ModelError(format!("Quantity of copies cannot be negative: {}", value)));
        }
        match u32::try_from(value) {
            Ok(quantity) => QuantityCopies::new(quantity),
            Err(e) => Err(ModelError(format!("Quantity of copies cannot be represented: {}", e))),
        }
    }
}

impl From<QuantityCopies> for u32 {
    fn from(value: QuantityCopies) -> Self {
        value.0
    }
}

/// Contents of a book record, which is everything but its identifier.
///
/// This represents a book whose identifier has not been assigned yet, as happens between
/// receiving a creation request and storing the record.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BookDetails {
    /// Title of the book.
    pub(crate) title: Title,

    /// Name of the author.
    pub(crate) author: String,

    /// Name of the publisher.
    pub(crate) publisher: String,

    /// Year in which the book was published.
    pub(crate) publication_year: i32,

    /// Genre label of the book.
    pub(crate) gender: String,

    /// Number of copies that the library owns.
    pub(crate) quantity_copies: QuantityCopies,

    /// Whether the book can currently be borrowed.
    pub(crate) available: bool,

    /// Timestamp of the last mutation of the record.
    pub(crate) updated_in: OffsetDateTime,
}

/// A book known to the catalog.
#[derive(Clone, Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Book {
    /// Identifier assigned by the database.
    id: BookId,

    /// Contents of the record.
    details: BookDetails,
}

impl Book {
    /// Breaks the book apart into its identifier and its contents.
    pub(crate) fn into_parts(self) -> (BookId, BookDetails) {
        (self.id, self.details)
    }
}

/// Payload of a request to create a new book.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Clone, Debug, Serialize))]
pub(crate) struct CreateBookRequest {
    /// Title of the book.
    pub(crate) title: Title,

    /// Name of the author.
    pub(crate) author: String,

    /// Name of the publisher.
    pub(crate) publisher: String,

    /// Year in which the book was published.
    pub(crate) publication_year: i32,

    /// Genre label of the book.
    pub(crate) gender: String,

    /// Number of copies that the library owns.
    pub(crate) quantity_copies: QuantityCopies,

    /// Whether the book can currently be borrowed.
    pub(crate) available: bool,
}

/// Deserializes a field that may be omitted but that cannot be `null` when present.
///
/// Combined with `#[serde(default)]`, an omitted field becomes `None` while an explicit `null` is
/// rejected with the same error that `T` would raise for it.
fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Payload of a request to partially update a book.
///
/// Fields set to `None` were not supplied by the caller and must be left untouched.  None of the
/// fields are nullable so `null` values are rejected.
#[derive(Default, Deserialize)]
#[cfg_attr(test, derive(Debug, Serialize))]
#[serde(deny_unknown_fields)]
pub(crate) struct UpdateBookRequest {
    /// New title of the book, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<Title>,

    /// New name of the author, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) author: Option<String>,

    /// New name of the publisher, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) publisher: Option<String>,

    /// New publication year, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) publication_year: Option<i32>,

    /// New genre label, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) gender: Option<String>,

    /// New number of copies, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) quantity_copies: Option<QuantityCopies>,

    /// New availability, if any.
    #[serde(default, deserialize_with = "non_null", skip_serializing_if = "Option::is_none")]
    pub(crate) available: Option<bool>,
}

/// Representation of a book as returned to callers.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookResponse {
    /// Identifier of the book.
    pub(crate) id: BookId,

    /// Title of the book.
    pub(crate) title: String,

    /// Name of the author.
    pub(crate) author: String,

    /// Name of the publisher.
    pub(crate) publisher: String,

    /// Year in which the book was published.
    pub(crate) publication_year: i32,

    /// Genre label of the book.
    pub(crate) gender: String,

    /// Number of copies that the library owns.
    pub(crate) quantity_copies: u32,

    /// Whether the book can currently be borrowed.
    pub(crate) available: bool,

    /// Timestamp of the last mutation of the record.
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) updated_in: OffsetDateTime,
}

/// Representation of a page of books as returned to callers.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookListResponse {
    /// Books in the requested page, sorted by identifier.
    pub(crate) items: Vec<BookResponse>,

    /// Number of books in the catalog, regardless of the page.
    #[serde(rename = "totalCount")]
    pub(crate) total_count: u64,

    /// Maximum page size as requested by the caller.
    pub(crate) limit: u32,

    /// Number of skipped books as requested by the caller.
    pub(crate) offset: u32,
}
