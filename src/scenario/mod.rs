use reqwest::StatusCode;
use serde_json::Value;

use crate::assert;
use crate::client::{BooksClient, Reply};
use crate::error::ScenarioError;
use crate::fixture::Fixture;
use crate::models::BookId;

mod create;
mod delete;
mod read;
mod reject;

pub use create::PostThreeBooks;
pub use delete::{Cleanup, DeleteBook2};
pub use read::{GetAllBooks, GetBook1, GetDeletedBook2};
pub use reject::{PostBookWithInvalidGenre, PostInvalidBook};

/// One named step of the suite
pub trait Scenario {
    fn name(&self) -> &'static str;

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError>;
}

/// State handed from one scenario to the next
pub struct Context {
    pub client: BooksClient,
    pub fixture: Fixture,
    /// Ids returned by `post_three_books`, dropped again once `cleanup` removes them
    pub created: Vec<BookId>,
    /// Written by `delete_book2`, read by `get_deleted_book2`
    pub deleted_book: Option<BookId>,
}

impl Context {
    pub fn new(client: BooksClient, fixture: Fixture) -> Context {
        Context {
            client,
            fixture,
            created: vec![],
            deleted_book: None,
        }
    }
}

/// Every scenario, in the order the suite runs them
pub fn ordered() -> Vec<Box<dyn Scenario>> {
    vec![
        Box::new(PostThreeBooks),
        Box::new(GetBook1),
        Box::new(GetAllBooks),
        Box::new(PostInvalidBook),
        Box::new(DeleteBook2),
        Box::new(GetDeletedBook2),
        Box::new(PostBookWithInvalidGenre),
        Box::new(Cleanup),
    ]
}

/// `GET /books`, expecting 200 and a JSON array
fn list_books(ctx: &Context) -> Result<Vec<Value>, ScenarioError> {
    let reply = ctx.client.list()?;

    assert::status(&reply, StatusCode::OK)?;

    books_of(&reply)
}

/// Body of a listing; valid JSON that is not an array is a shape mismatch
fn books_of(reply: &Reply) -> Result<Vec<Value>, ScenarioError> {
    match reply.json::<Value>()? {
        Value::Array(books) => Ok(books),
        other => Err(ScenarioError::assertion(format!(
            "{}: expected a list of books, but got {}",
            reply.request_line(),
            other
        ))),
    }
}

/// Id of the listed book whose ISBN matches fixture entry `key`
fn find_by_isbn(ctx: &Context, key: &str) -> Result<BookId, ScenarioError> {
    let isbn = ctx.fixture.isbn(key)?;

    let books = list_books(ctx)?;

    let book = books
        .iter()
        .find(|book| book.get("ISBN").and_then(Value::as_str) == Some(isbn))
        .ok_or_else(|| {
            ScenarioError::assertion(format!(
                "Book {} (ISBN {}) not found in the service",
                key, isbn
            ))
        })?;

    id_of(book)
}

/// Ids of every listed book
fn listed_ids(ctx: &Context) -> Result<Vec<BookId>, ScenarioError> {
    list_books(ctx)?.iter().map(id_of).collect()
}

fn id_of(book: &Value) -> Result<BookId, ScenarioError> {
    let id = book
        .get("id")
        .ok_or_else(|| ScenarioError::assertion(format!("Book has no 'id' field: {}", book)))?;

    serde_json::from_value::<BookId>(id.clone()).map_err(|_| {
        ScenarioError::assertion(format!("Book id {} is neither a string nor an integer", id))
    })
}
