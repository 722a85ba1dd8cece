use std::fmt;

use log::{error, info, LevelFilter};

use crate::error::ScenarioError;

pub fn update(name: &str, stage: Stage) {
    match stage {
        Stage::Fail(err) => error!("{}: {}: {}", name, stage, err),
        other => info!("{}: {}", name, other),
    }
}

/// Filter for `-q` / `-v` / `-vv`; per-response output is logged at debug
pub fn log_filter(quiet: bool, verbose: u8) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

pub enum Stage<'a> {
    Started,
    Passed,
    Fail(&'a ScenarioError),
}

impl<'a> fmt::Display for Stage<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = match self {
            Self::Started => "Started",
            Self::Passed => "Passed",
            Self::Fail(err) if err.is_precondition() => "Skipped",
            Self::Fail(_) => "Failed",
        };

        f.write_str(r)
    }
}
