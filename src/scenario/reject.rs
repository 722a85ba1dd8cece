use log::info;
use reqwest::StatusCode;
use serde_json::Value;

use super::{Context, Scenario};
use crate::assert;
use crate::client::Reply;
use crate::error::ScenarioError;

pub const INVALID_GENRE: &str = "Invalid Genre";

/// `book4` is missing required fields and must be refused
pub struct PostInvalidBook;

impl Scenario for PostInvalidBook {
    fn name(&self) -> &'static str {
        "post_invalid_book"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let reply = ctx.client.create(ctx.fixture.payload("book4")?)?;

        check_malformed_reply(&reply)?;

        info!(
            "Received expected error status {} for invalid book",
            reply.status.as_u16()
        );

        Ok(())
    }
}

/// 400 or 500; a JSON body must carry `error`, a non-JSON body is only
/// accepted together with 500.
fn check_malformed_reply(reply: &Reply) -> Result<(), ScenarioError> {
    assert::status_in(
        reply,
        &[StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR],
    )?;

    if reply.is_json() {
        let body = reply.json::<Value>()?;
        assert::has_fields(&body, &["error"], "Error response")?;
        info!("Error message: {}", body["error"]);
    } else if reply.status != StatusCode::INTERNAL_SERVER_ERROR {
        return Err(ScenarioError::assertion(format!(
            "{}: non-JSON error body is only accepted with status 500, got {}: {}",
            reply.request_line(),
            reply.status.as_u16(),
            reply.body
        )));
    }

    Ok(())
}

/// `book5` uses a genre outside the allowed set
pub struct PostBookWithInvalidGenre;

impl Scenario for PostBookWithInvalidGenre {
    fn name(&self) -> &'static str {
        "post_book_with_invalid_genre"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let reply = ctx.client.create(ctx.fixture.payload("book5")?)?;

        assert::status(&reply, StatusCode::UNPROCESSABLE_ENTITY)?;

        let body = reply.json::<Value>()?;
        assert::field_eq(&body, "error", INVALID_GENRE, "Error response")?;

        info!("Received 422 for book with invalid genre");

        Ok(())
    }
}
