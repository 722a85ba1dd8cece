use log::info;
use reqwest::StatusCode;

use super::{find_by_isbn, list_books, listed_ids, Context, Scenario};
use crate::assert;
use crate::error::ScenarioError;

/// Deletes `book2` and remembers its id for `get_deleted_book2`
pub struct DeleteBook2;

impl Scenario for DeleteBook2 {
    fn name(&self) -> &'static str {
        "delete_book2"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let id = find_by_isbn(ctx, "book2")?;
        ctx.deleted_book = Some(id.clone());

        let reply = ctx.client.delete(&id)?;
        assert::status(&reply, StatusCode::OK)?;

        info!("Deleted book2 with ID {}", id);

        Ok(())
    }
}

/// Deletes whatever is left so the next run starts from an empty service
pub struct Cleanup;

impl Scenario for Cleanup {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn run(&self, ctx: &mut Context) -> Result<(), ScenarioError> {
        let ids = listed_ids(ctx)?;

        for id in ids.iter() {
            let reply = ctx.client.delete(id)?;
            assert::status(&reply, StatusCode::OK)?;
        }

        let created = ctx.created.len();
        ctx.created.retain(|id| !ids.contains(id));
        info!(
            "Removed {} of {} books created by this run",
            created - ctx.created.len(),
            created
        );

        let remaining = list_books(ctx)?;
        if !remaining.is_empty() {
            return Err(ScenarioError::assertion(format!(
                "Not all books were deleted, {} left",
                remaining.len()
            )));
        }

        info!("Cleaned up {} books", ids.len());

        Ok(())
    }
}
