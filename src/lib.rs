pub mod assert;
pub mod client;
pub mod error;
pub mod fixture;
pub mod models;
pub mod scenario;
pub mod stage;
pub mod suite;

pub use client::{BooksClient, Reply};
pub use error::ScenarioError;
pub use fixture::Fixture;
pub use suite::{Suite, SuiteConfig, SuiteReport};
