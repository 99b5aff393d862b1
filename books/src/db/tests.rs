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

//! Database tests shared by all implementations.

use crate::db::*;
use crate::mapper::testutils::numbered_details;
use crate::model::{QuantityCopies, Title};
use iii_iv_core::db::Db;
use time::macros::datetime;

/// Inserts `count` books whose contents are derived from their position and returns them in
/// insertion order.
async fn insert_books<D: Db>(db: &D, count: u32) -> Vec<Book> {
    let mut books = Vec::with_capacity(count as usize);
    for i in 0..count {
        books.push(create_book(&mut db.ex().await.unwrap(), &numbered_details(i)).await.unwrap());
    }
    books
}

async fn test_create_and_get<D: Db>(db: D) {
    let details = numbered_details(1);
    let book = create_book(&mut db.ex().await.unwrap(), &details).await.unwrap();
    assert_eq!(&details, book.details());

    let book2 = create_book(&mut db.ex().await.unwrap(), &details).await.unwrap();
    assert_ne!(book.id(), book2.id());

    assert_eq!(book, get_book(&mut db.ex().await.unwrap(), *book.id()).await.unwrap());
    assert_eq!(book2, get_book(&mut db.ex().await.unwrap(), *book2.id()).await.unwrap());

    db.close().await;
}

async fn test_get_not_found<D: Db>(db: D) {
    assert_eq!(
        DbError::NotFound,
        get_book(&mut db.ex().await.unwrap(), BookId::new(123)).await.unwrap_err()
    );

    let book = create_book(&mut db.ex().await.unwrap(), &numbered_details(1)).await.unwrap();
    let missing = BookId::new(book.id().as_i64() + 1);
    assert_eq!(
        DbError::NotFound,
        get_book(&mut db.ex().await.unwrap(), missing).await.unwrap_err()
    );

    db.close().await;
}

async fn test_timestamp_precision<D: Db>(db: D) {
    let mut details = numbered_details(1);
    details.updated_in = datetime!(2023-06-12 06:20:00.123456 UTC);
    let book = create_book(&mut db.ex().await.unwrap(), &details).await.unwrap();
    assert_eq!(details.updated_in, book.details().updated_in);

    let book = get_book(&mut db.ex().await.unwrap(), *book.id()).await.unwrap();
    assert_eq!(details.updated_in, book.details().updated_in);

    db.close().await;
}

async fn test_count_and_pages<D: Db>(db: D) {
    assert_eq!(0, count_books(&mut db.ex().await.unwrap()).await.unwrap());
    assert!(get_books(&mut db.ex().await.unwrap(), 10, 0).await.unwrap().is_empty());

    let books = insert_books(&db, 5).await;

    for (limit, offset) in [(0, 0), (2, 4), (10, 10), (1, 1000)] {
        assert_eq!(
            5,
            count_books(&mut db.ex().await.unwrap()).await.unwrap(),
            "Count changed with limit={} offset={}",
            limit,
            offset
        );
    }

    assert_eq!(books, get_books(&mut db.ex().await.unwrap(), 10, 0).await.unwrap());
    assert_eq!(&books[0..2], get_books(&mut db.ex().await.unwrap(), 2, 0).await.unwrap());
    assert_eq!(&books[2..4], get_books(&mut db.ex().await.unwrap(), 2, 2).await.unwrap());
    assert_eq!(&books[4..5], get_books(&mut db.ex().await.unwrap(), 2, 4).await.unwrap());
    assert!(get_books(&mut db.ex().await.unwrap(), 2, 5).await.unwrap().is_empty());
    assert!(get_books(&mut db.ex().await.unwrap(), 0, 0).await.unwrap().is_empty());

    db.close().await;
}

async fn test_pages_are_deterministic<D: Db>(db: D) {
    insert_books(&db, 7).await;

    let first = get_books(&mut db.ex().await.unwrap(), 3, 2).await.unwrap();
    let second = get_books(&mut db.ex().await.unwrap(), 3, 2).await.unwrap();
    assert_eq!(first, second);

    let mut ids = get_books(&mut db.ex().await.unwrap(), 100, 0)
        .await
        .unwrap()
        .iter()
        .map(|b| b.id().as_i64())
        .collect::<Vec<i64>>();
    let unsorted = ids.clone();
    ids.sort();
    assert_eq!(ids, unsorted);

    db.close().await;
}

async fn test_update<D: Db>(db: D) {
    let book1 = create_book(&mut db.ex().await.unwrap(), &numbered_details(1)).await.unwrap();
    let book2 = create_book(&mut db.ex().await.unwrap(), &numbered_details(2)).await.unwrap();

    let (id, mut details) = book1.clone().into_parts();
    details.title = Title::new("New title").unwrap();
    details.quantity_copies = QuantityCopies::new(0).unwrap();
    details.available = false;
    details.updated_in = datetime!(2023-07-01 12:00:00 UTC);
    let updated = Book::new(id, details);

    assert_eq!(updated, update_book(&mut db.ex().await.unwrap(), &updated).await.unwrap());
    assert_eq!(updated, get_book(&mut db.ex().await.unwrap(), id).await.unwrap());
    assert_eq!(book2, get_book(&mut db.ex().await.unwrap(), *book2.id()).await.unwrap());

    db.close().await;
}

async fn test_update_not_found<D: Db>(db: D) {
    let book = Book::new(BookId::new(55), numbered_details(1));
    assert_eq!(
        DbError::NotFound,
        update_book(&mut db.ex().await.unwrap(), &book).await.unwrap_err()
    );
    assert_eq!(0, count_books(&mut db.ex().await.unwrap()).await.unwrap());

    db.close().await;
}

async fn test_update_rolled_back_on_drop<D: Db>(db: D) {
    let book = create_book(&mut db.ex().await.unwrap(), &numbered_details(1)).await.unwrap();

    {
        let mut tx = db.begin().await.unwrap();
        let (id, mut details) = book.clone().into_parts();
        details.author = "Someone else".to_owned();
        update_book(tx.ex(), &Book::new(id, details)).await.unwrap();
    }

    assert_eq!(book, get_book(&mut db.ex().await.unwrap(), *book.id()).await.unwrap());

    db.close().await;
}

async fn test_delete<D: Db>(db: D) {
    let books = insert_books(&db, 3).await;

    let deleted = delete_book(&mut db.ex().await.unwrap(), *books[1].id()).await.unwrap();
    assert_eq!(books[1], deleted);

    assert_eq!(
        DbError::NotFound,
        get_book(&mut db.ex().await.unwrap(), *books[1].id()).await.unwrap_err()
    );
    assert_eq!(
        DbError::NotFound,
        delete_book(&mut db.ex().await.unwrap(), *books[1].id()).await.unwrap_err()
    );
    assert_eq!(2, count_books(&mut db.ex().await.unwrap()).await.unwrap());
    assert_eq!(
        vec![books[0].clone(), books[2].clone()],
        get_books(&mut db.ex().await.unwrap(), 10, 0).await.unwrap()
    );

    db.close().await;
}

async fn test_delete_committed_in_tx<D: Db>(db: D) {
    let book = create_book(&mut db.ex().await.unwrap(), &numbered_details(1)).await.unwrap();

    let mut tx = db.begin().await.unwrap();
    delete_book(tx.ex(), *book.id()).await.unwrap();
    tx.commit().await.unwrap();

    assert_eq!(
        DbError::NotFound,
        get_book(&mut db.ex().await.unwrap(), *book.id()).await.unwrap_err()
    );

    db.close().await;
}

macro_rules! generate_db_tests [
    ( $setup:expr $(, #[$extra:meta] )? ) => {
        iii_iv_core::db::testutils::generate_tests!(
            $(#[$extra],)?
            $setup,
            $crate::db::tests,
            test_create_and_get,
            test_get_not_found,
            test_timestamp_precision,
            test_count_and_pages,
            test_pages_are_deterministic,
            test_update,
            test_update_not_found,
            test_update_rolled_back_on_drop,
            test_delete,
            test_delete_committed_in_tx
        );
    }
];

use generate_db_tests;

mod postgres {
    use super::*;
    use iii_iv_core::db::postgres::PostgresDb;

    async fn setup() -> PostgresDb {
        let db = iii_iv_core::db::postgres::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(
        setup().await,
        #[ignore = "Requires environment configuration and is expensive"]
    );
}

mod sqlite {
    use super::*;
    use iii_iv_core::db::sqlite::SqliteDb;

    async fn setup() -> SqliteDb {
        let db = iii_iv_core::db::sqlite::testutils::setup().await;
        init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        db
    }

    generate_db_tests!(setup().await);
}
