//! Nominal book flows: listing, lookup, create/update/delete round trips
//! and ordering over the collection.

use bookstore_harness::{check, check_eq, eyre, logger, recorder::run_test, Book};

use crate::fixtures::{self, BOOKS_ENDPOINT, VALID_BOOK_ID};

#[tokio::test]
async fn list_all_books() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let catalog = fixtures::books(1..=8);
    let mock = server
        .mock("GET", BOOKS_ENDPOINT)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(fixtures::json_body(&catalog))
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("list_all_books", || async {
        let response = service.list_books().await?;
        let books: Vec<Book> = response.json()?;
        logger::log(format!("📊 Total number of books: {}", books.len()));
        logger::log("📋 First 5 books:");
        for book in books.iter().take(5) {
            logger::log_book(book);
        }
        logger::log("📋 Last 5 books:");
        for book in books.iter().rev().take(5).rev() {
            logger::log_book(book);
        }

        check_eq!(200, response.status().as_u16(), "Should return 200 OK");
        check!(!books.is_empty(), "Book list should not be empty");
        Ok(())
    })
    .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn get_book_by_id() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let expected = fixtures::book(VALID_BOOK_ID, "Book 1");
    let mock = server
        .mock("GET", format!("{BOOKS_ENDPOINT}/{VALID_BOOK_ID}").as_str())
        .with_status(200)
        .with_body(fixtures::json_body(&expected))
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("get_book_by_id", || async {
        let response = service.get_book(VALID_BOOK_ID).await?;
        let book: Book = response.json()?;
        logger::log_book(&book);
        logger::log_response(&response);

        check_eq!(200, response.status().as_u16());
        check_eq!(VALID_BOOK_ID, book.id, "Book ID should match requested ID");
        check!(book.title.is_some(), "Book title should not be null");
        Ok(())
    })
    .await?;

    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn add_update_delete_book() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mut new_book = fixtures::book(0, "Freshly Written");
    let mut created = new_book.clone();
    created.id = 42;

    let add = server
        .mock("POST", BOOKS_ENDPOINT)
        .with_status(200)
        .with_body(fixtures::json_body(&created))
        .create_async()
        .await;
    let update = server
        .mock("PUT", format!("{BOOKS_ENDPOINT}/42").as_str())
        .with_status(200)
        .with_body(fixtures::json_body(&created))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", format!("{BOOKS_ENDPOINT}/42").as_str())
        .with_status(200)
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("add_update_delete_book", || async {
        logger::log("➕ Adding book: ");
        logger::log_book(&new_book);
        let add_response = service.create_book(&new_book).await?;
        check_eq!(200, add_response.status().as_u16());

        let created: Book = add_response.json()?;
        new_book.id = created.id;
        new_book.title = Some("Freshly Retitled".to_string());
        logger::log("✏️ Updating book: ");
        logger::log_book(&new_book);
        let update_response = service.update_book(new_book.id, &new_book).await?;
        check_eq!(200, update_response.status().as_u16());

        logger::log(format!("🗑️ Deleting book with id: {}", new_book.id));
        let delete_response = service.delete_book(new_book.id).await?;
        check_eq!(200, delete_response.status().as_u16());
        Ok(())
    })
    .await?;

    add.assert_async().await;
    update.assert_async().await;
    delete.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn update_book_and_verify() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mut book = fixtures::book(7, "Original Title");
    let created = book.clone();
    book.title = Some("Updated Title".to_string());

    let add = server
        .mock("POST", BOOKS_ENDPOINT)
        .with_status(200)
        .with_body(fixtures::json_body(&created))
        .create_async()
        .await;
    let update = server
        .mock("PUT", format!("{BOOKS_ENDPOINT}/7").as_str())
        .with_status(200)
        .with_body(fixtures::json_body(&book))
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("update_book_and_verify", || async {
        let add_response = service.create_book(&created).await?;
        let update_response = service.update_book(book.id, &book).await?;
        let updated: Book = update_response.json()?;
        logger::log("✏️ Updated book: ");
        logger::log_book(&updated);

        check_eq!(200, add_response.status().as_u16());
        check_eq!(200, update_response.status().as_u16());
        check_eq!(book.title, updated.title, "Updated title should match");
        Ok(())
    })
    .await?;

    add.assert_async().await;
    update.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn delete_book_and_verify() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let book = fixtures::book(11, "Doomed Book");

    let add = server
        .mock("POST", BOOKS_ENDPOINT)
        .with_status(200)
        .with_body(fixtures::json_body(&book))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", format!("{BOOKS_ENDPOINT}/11").as_str())
        .with_status(200)
        .create_async()
        .await;
    let get_after = server
        .mock("GET", format!("{BOOKS_ENDPOINT}/11").as_str())
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("delete_book_and_verify", || async {
        let add_response = service.create_book(&book).await?;
        let delete_response = service.delete_book(book.id).await?;
        logger::log(format!("🗑️ Deleted book with ID: {}", book.id));

        check_eq!(200, add_response.status().as_u16());
        check_eq!(200, delete_response.status().as_u16());
        let get_response = service.get_book(book.id).await?;
        check_eq!(
            404,
            get_response.status().as_u16(),
            "Book should not exist after deletion"
        );
        Ok(())
    })
    .await?;

    add.assert_async().await;
    delete.assert_async().await;
    get_after.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn books_sorted_by_title_desc() -> eyre::Result<()> {
    let mut server = mockito::Server::new_async().await;
    let catalog = vec![
        fixtures::book(1, "Middlemarch"),
        fixtures::book(2, "Atonement"),
        fixtures::book(3, "Zorba"),
    ];
    let mock = server
        .mock("GET", BOOKS_ENDPOINT)
        .with_status(200)
        .with_body(fixtures::json_body(&catalog))
        .create_async()
        .await;
    let service = fixtures::client_for(&server);

    run_test("books_sorted_by_title_desc", || async {
        let response = service.list_books().await?;
        let mut books: Vec<Book> = response.json()?;
        books.sort_by(|a, b| b.title.cmp(&a.title));
        for book in &books {
            logger::log(format!("🔤 {}", book.title.as_deref().unwrap_or("null")));
        }

        check_eq!(200, response.status().as_u16(), "Should return 200 OK");
        check!(books.len() > 1, "Should have at least two books to sort");
        for pair in books.windows(2) {
            check!(
                pair[0].title >= pair[1].title,
                "Books should be sorted by title in descending order"
            );
        }
        Ok(())
    })
    .await?;

    mock.assert_async().await;
    Ok(())
}
