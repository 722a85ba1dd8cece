use log::info;
use reqwest::StatusCode;
use serde_json::Value;

use super::{books_of, find_by_isbn, Context, Scenario};
use crate::assert;
use crate::error::ScenarioError;

const BOOK_FIELDS: [&str; 4] = ["id", "title", "ISBN", "genre"];

/// Looks up `book1` by ISBN and reads it back by id
pub struct GetBook1;

impl Scenario for GetBook1 {
    fn name(&self) -> &'static str {
        "get_book1"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let expected = ctx.fixture.record("book1")?;
        let id = find_by_isbn(ctx, "book1")?;

        let reply = ctx.client.get(&id)?;
        assert::status(&reply, StatusCode::OK)?;

        let book = reply.json::<Value>()?;
        assert::field_eq(&book, "authors", &expected.authors, "book1")?;

        info!("Retrieved {} ({}) with author {}", id, expected.title, expected.authors);

        Ok(())
    }
}

/// The listing holds exactly the three created books
pub struct GetAllBooks;

impl Scenario for GetAllBooks {
    fn name(&self) -> &'static str {
        "get_all_books"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let reply = ctx.client.list()?;
        assert::status(&reply, StatusCode::OK)?;

        let books = books_of(&reply)?;

        if books.len() != 3 {
            return Err(ScenarioError::assertion(format!(
                "Expected 3 books, but got {}",
                books.len()
            )));
        }

        for book in books.iter() {
            assert::has_fields(book, &BOOK_FIELDS, "Listed book")?;
        }

        info!("Retrieved 3 books");

        Ok(())
    }
}

/// The id removed by `delete_book2` is gone for good
pub struct GetDeletedBook2;

impl Scenario for GetDeletedBook2 {
    fn name(&self) -> &'static str {
        "get_deleted_book2"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let id = ctx.deleted_book.clone().ok_or_else(|| {
            ScenarioError::Precondition(String::from(
                "no deleted book id, delete_book2 must run before get_deleted_book2",
            ))
        })?;

        let reply = ctx.client.get(&id)?;
        assert::status(&reply, StatusCode::NOT_FOUND)?;

        info!("Deleted book {} returns 404", id);

        Ok(())
    }
}
