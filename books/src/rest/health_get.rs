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

//! API to check that the service is up.

use axum::response::IntoResponse;
use axum::Json;
use iii_iv_core::rest::{EmptyBody, RestError};
use log::info;
use serde::Serialize;

/// Message returned by the health check.
const WELCOME_MESSAGE: &str = "Welcome to the Library Management System API";

/// Message returned by this API.
#[derive(Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub(crate) struct HealthResponse {
    /// Greeting for the caller.
    message: String,
}

/// API handler.
pub(crate) async fn handler(_: EmptyBody) -> Result<impl IntoResponse, RestError> {
    info!("Health check requested");
    Ok(Json(HealthResponse { message: WELCOME_MESSAGE.to_owned() }))
}
