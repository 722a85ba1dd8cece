use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde_json::Value;

use crate::models::BookRecord;

/// Books posted by the suite, keyed `book1` .. `book5`.
///
/// Entries stay raw JSON so that deliberately malformed payloads reach the
/// service exactly as written.
#[derive(Debug, Clone)]
pub struct Fixture {
    inner: BTreeMap<String, Value>,
}

/// `tests/book_data.json` next to this crate's manifest
pub fn default_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("book_data.json")
}

impl Fixture {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();

        let text = fs::read_to_string(path)
            .with_context(|| format!("Can't read fixture {}", path.display()))?;

        Self::parse(&text).with_context(|| format!("Invalid fixture {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let inner = serde_json::from_str::<BTreeMap<String, Value>>(text)?;

        Ok(Self { inner })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    /// Raw payload as stored in the fixture file
    pub fn payload(&self, key: &str) -> anyhow::Result<&Value> {
        self.inner
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("Fixture has no entry `{}`", key))
    }

    pub fn record(&self, key: &str) -> anyhow::Result<BookRecord> {
        let payload = self.payload(key)?;

        serde_json::from_value(payload.clone())
            .with_context(|| format!("Fixture entry `{}` is not a complete book", key))
    }

    pub fn isbn(&self, key: &str) -> anyhow::Result<&str> {
        self.payload(key)?
            .get("ISBN")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("Fixture entry `{}` has no ISBN", key))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{default_path, Fixture};

    const SAMPLE: &str = r#"{
        "book1": {
            "title": "Adventures of Huckleberry Finn",
            "authors": "Mark Twain",
            "ISBN": "978-0-12345-678-9",
            "genre": "Fiction"
        },
        "book4": {
            "authors": "Nobody"
        }
    }"#;

    #[test]
    fn load_from_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;

        let fixture = Fixture::from_file(file.path())?;

        assert_eq!(vec!["book1", "book4"], fixture.keys().collect::<Vec<_>>());
        assert_eq!("Mark Twain", fixture.record("book1")?.authors);
        assert_eq!("978-0-12345-678-9", fixture.isbn("book1")?);

        Ok(())
    }

    #[test]
    fn malformed_entry_keeps_raw_payload() -> anyhow::Result<()> {
        let fixture = Fixture::parse(SAMPLE)?;

        assert!(fixture.record("book4").is_err());
        assert!(fixture.isbn("book4").is_err());
        assert_eq!("Nobody", fixture.payload("book4")?["authors"]);

        Ok(())
    }

    #[test]
    fn missing_key() -> anyhow::Result<()> {
        let fixture = Fixture::parse(SAMPLE)?;

        let err = fixture.payload("book9").unwrap_err();

        assert!(err.to_string().contains("book9"));

        Ok(())
    }

    #[test]
    fn missing_file() {
        let r = Fixture::from_file("/nonexistent/book_data.json");

        assert!(r.is_err());
    }

    #[test]
    fn malformed_file() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"{ \"book1\": ")?;

        assert!(Fixture::from_file(file.path()).is_err());

        Ok(())
    }

    #[test]
    fn default_fixture_has_five_books() -> anyhow::Result<()> {
        let fixture = Fixture::from_file(default_path())?;

        assert_eq!(
            vec!["book1", "book2", "book3", "book4", "book5"],
            fixture.keys().collect::<Vec<_>>()
        );
        assert_eq!("Mark Twain", fixture.record("book1")?.authors);
        assert_eq!("NotARealGenre", fixture.record("book5")?.genre);
        assert!(fixture.record("book4").is_err());

        Ok(())
    }
}
