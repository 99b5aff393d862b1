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

//! API to get a page of books.

use crate::driver::Driver;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use iii_iv_core::rest::{EmptyBody, QueryParams, RestError};
use serde::Deserialize;

/// Default maximum number of books to return when the caller does not specify one.
const DEFAULT_LIMIT: u32 = 10;

/// Returns the default value of the `limit` parameter.
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Query parameters for this API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct ListParams {
    /// Maximum number of books to return.
    #[serde(default = "default_limit")]
    limit: u32,

    /// Number of books to skip before the first returned one.
    #[serde(default)]
    offset: u32,
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    QueryParams(params): QueryParams<ListParams>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let page = driver.get_books(params.limit, params.offset).await?;
    Ok(Json(page))
}
