use thiserror::Error;

/// Why a scenario failed
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// Expected and observed values differ
    #[error("{0}")]
    Assertion(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Body had to be JSON and was not
    #[error("Invalid JSON response for {context}: {body}")]
    NotJson { context: String, body: String },

    /// A scenario ran before the one that prepares its state
    #[error("Precondition not met: {0}")]
    Precondition(String),

    #[error("Fixture error: {0:#}")]
    Fixture(#[from] anyhow::Error),
}

impl ScenarioError {
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
