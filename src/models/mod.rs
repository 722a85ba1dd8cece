mod book;
mod book_id;

pub use book::{Book, BookRecord};
pub use book_id::BookId;
