use serde::{Deserialize, Serialize};

use super::BookId;

/// Payload of `POST /books`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub authors: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub genre: String,
}

/// Book as the service returns it, with the identifier it assigned
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: String,
    #[serde(rename = "ISBN")]
    pub isbn: String,
    pub genre: String,
}

impl Book {
    pub fn record(&self) -> BookRecord {
        BookRecord {
            title: self.title.clone(),
            authors: self.authors.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.clone(),
        }
    }
}
