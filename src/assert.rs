//! Checks shared by the scenarios. Each one turns a mismatch into a
//! [`ScenarioError::Assertion`] that names the request and what came back.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::client::Reply;
use crate::error::ScenarioError;

pub fn status(reply: &Reply, expected: StatusCode) -> Result<(), ScenarioError> {
    status_in(reply, &[expected])
}

pub fn status_in(reply: &Reply, expected: &[StatusCode]) -> Result<(), ScenarioError> {
    if expected.contains(&reply.status) {
        return Ok(());
    }

    let expected = expected
        .iter()
        .map(|status| status.as_u16().to_string())
        .collect::<Vec<_>>()
        .join(" or ");

    Err(ScenarioError::assertion(format!(
        "{}: expected status {}, got {}: {}",
        reply.request_line(),
        expected,
        reply.status.as_u16(),
        reply.body
    )))
}

pub fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, ScenarioError> {
    value.as_object().ok_or_else(|| {
        ScenarioError::assertion(format!("Expected {} to be an object, got {}", what, value))
    })
}

pub fn has_fields(value: &Value, fields: &[&str], what: &str) -> Result<(), ScenarioError> {
    let object = object(value, what)?;

    match fields.iter().find(|field| !object.contains_key(**field)) {
        Some(missing) => Err(ScenarioError::assertion(format!(
            "{} does not contain an '{}' field: {}",
            what, missing, value
        ))),
        None => Ok(()),
    }
}

/// `value[field]` must be the string `expected`
pub fn field_eq(value: &Value, field: &str, expected: &str, what: &str) -> Result<(), ScenarioError> {
    has_fields(value, &[field], what)?;

    match value[field].as_str() {
        Some(actual) if actual == expected => Ok(()),
        _ => Err(ScenarioError::assertion(format!(
            "Expected {} '{}' to be '{}', got {}",
            what, field, expected, value[field]
        ))),
    }
}
