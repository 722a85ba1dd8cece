use std::path::{Path, PathBuf};

use anyhow::Context as _;
use log::{error, info};

use crate::client::BooksClient;
use crate::error::ScenarioError;
use crate::fixture::{self, Fixture};
use crate::scenario::{self, Context, Scenario};
use crate::stage::{self, Stage};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Where the service lives and which fixture to post
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub base_url: String,
    pub fixture_path: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SuiteConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fixture_path: fixture::default_path(),
        }
    }

    pub fn with_fixture(mut self, path: impl AsRef<Path>) -> Self {
        self.fixture_path = path.as_ref().to_path_buf();
        self
    }
}

/// Runs scenarios one after another against a single [`Context`]
pub struct Suite {
    context: Context,
    scenarios: Vec<Box<dyn Scenario>>,
}

impl Suite {
    /// Loads the fixture and prepares the full ordered suite
    pub fn new(config: &SuiteConfig) -> anyhow::Result<Suite> {
        let fixture = Fixture::from_file(&config.fixture_path)?;
        let client = BooksClient::new(&config.base_url)
            .with_context(|| format!("Can't build client for {}", config.base_url))?;

        Ok(Suite {
            context: Context::new(client, fixture),
            scenarios: scenario::ordered(),
        })
    }

    /// Replaces the scenarios to run, keeping the given order
    pub fn with_scenarios(mut self, scenarios: Vec<Box<dyn Scenario>>) -> Suite {
        self.scenarios = scenarios;
        self
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// A failing scenario is recorded and the next one still runs
    pub fn run(&mut self) -> SuiteReport {
        info!(
            "Running {} scenarios against {}",
            self.scenarios.len(),
            self.context.client.base_url()
        );

        let mut results = vec![];

        for scenario in self.scenarios.iter() {
            let name = scenario.name();
            stage::update(name, Stage::Started);

            let outcome = scenario.run(&mut self.context);

            match outcome {
                Ok(()) => stage::update(name, Stage::Passed),
                Err(ref err) => stage::update(name, Stage::Fail(err)),
            }

            results.push(ScenarioResult { name, outcome });
        }

        let report = SuiteReport { results };

        if report.is_success() {
            info!("{} scenarios passed", report.passed());
        } else {
            error!(
                "{} of {} scenarios failed",
                report.failures().count(),
                report.len()
            );
        }

        report
    }
}

#[derive(Debug)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub outcome: Result<(), ScenarioError>,
}

#[derive(Debug)]
pub struct SuiteReport {
    results: Vec<ScenarioResult>,
}

impl SuiteReport {
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| r.outcome.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn outcome(&self, name: &str) -> Option<&Result<(), ScenarioError>> {
        self.results
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }
}
