//! CLI runtime configuration.
//!
//! Configuration is resolved once at startup from the environment (after loading `.env`) and
//! command-line overrides, then passed to the command handlers. Handlers never read the
//! environment themselves.

use anyhow::{bail, Result};
use std::str::FromStr;

pub const LOG_ENV: &str = "DV_LOG";
pub const OUTPUT_ENV: &str = "DV_OUTPUT";
pub const DEFAULT_LOG_FILTER: &str = "dv=info,openehr=info";

/// How reports are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => bail!("unsupported output format '{other}' (expected yaml or json)"),
        }
    }
}

/// Configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CliConfig {
    log_filter: String,
    output: OutputFormat,
}

impl CliConfig {
    /// Resolve configuration from environment values and command-line overrides.
    ///
    /// `env` is a lookup function so tests can supply values without touching the process
    /// environment. A command-line value wins over the environment.
    pub fn resolve(
        env: impl Fn(&str) -> Option<String>,
        output_override: Option<OutputFormat>,
    ) -> Result<Self> {
        let log_filter = env(LOG_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let output = match output_override {
            Some(output) => output,
            None => match env(OUTPUT_ENV) {
                Some(raw) => raw.parse()?,
                None => OutputFormat::default(),
            },
        };

        Ok(Self { log_filter, output })
    }

    /// Resolve configuration from the process environment.
    pub fn from_env(output_override: Option<OutputFormat>) -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok(), output_override)
    }

    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }
}
