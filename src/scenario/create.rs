use std::collections::HashSet;

use log::info;
use reqwest::StatusCode;
use serde_json::Value;

use super::{id_of, Context, Scenario};
use crate::assert;
use crate::error::ScenarioError;

const KEYS: [&str; 3] = ["book1", "book2", "book3"];

/// Creates `book1` .. `book3`, each must get its own id
pub struct PostThreeBooks;

impl Scenario for PostThreeBooks {
    fn name(&self) -> &'static str {
        "post_three_books"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let mut ids = HashSet::new();

        for key in KEYS.iter() {
            let reply = ctx.client.create(ctx.fixture.payload(key)?)?;

            assert::status(&reply, StatusCode::CREATED)?;

            let body = reply.json::<Value>()?;
            assert::has_fields(&body, &["id"], &format!("Response for {}", key))?;

            let id = id_of(&body)?;
            ids.insert(id.clone());
            ctx.created.push(id);
        }

        if ids.len() != KEYS.len() {
            return Err(ScenarioError::assertion(format!(
                "Expected {} unique IDs, but got {}",
                KEYS.len(),
                ids.len()
            )));
        }

        info!("All three books posted with unique IDs");

        Ok(())
    }
}
