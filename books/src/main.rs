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

//! Entry point to the book catalog service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use iii_iv_books::db::init_schema;
use iii_iv_books::serve;
use iii_iv_core::db::postgres::{PostgresDb, PostgresOptions};
use iii_iv_core::db::Db;
use iii_iv_core::env::get_optional_var;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Prefix of all environment variables that configure this service.
const ENV_PREFIX: &str = "BOOKS";

/// Port to listen on when none is configured.
const DEFAULT_PORT: u16 = 8000;

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>(ENV_PREFIX, "PORT")
        .expect("Invalid port configuration")
        .unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::UNSPECIFIED, port);

    let db_opts = PostgresOptions::from_env(&format!("{}_DB", ENV_PREFIX))
        .expect("Invalid database configuration");
    let db = Arc::from(PostgresDb::connect(db_opts).expect("Cannot set up the database pool"));
    init_schema(&mut db.ex().await.expect("Cannot connect to the database"))
        .await
        .expect("Cannot initialize the database schema");

    let result = serve(addr, db.clone()).await;
    db.close().await;
    result.expect("Server failed")
}
