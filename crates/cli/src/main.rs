use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use openehr::{DatePattern, DatePrecision, DvBoolean, DvDate, DvDuration};

mod config;

use config::{CliConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "dv")]
#[command(about = "Inspect and validate openEHR data values")]
struct Cli {
    /// Output format (yaml or json); overrides DV_OUTPUT
    #[arg(long, global = true)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a partial date (YYYY, YYYY-MM, YYYY-MM-DD or YYYYMMDD)
    Date {
        /// Date text
        value: String,
        /// Accuracy as an ISO-8601 duration (for example PT1H)
        #[arg(long)]
        accuracy: Option<String>,
        /// C_DATE pattern the date must satisfy (for example yyyy-mm-??)
        #[arg(long)]
        pattern: Option<String>,
        /// Reshape the date to the pattern instead of rejecting it, dropping any time of day
        #[arg(long, requires = "pattern")]
        conform: bool,
    },
    /// Parse an ISO-8601 duration
    Duration {
        /// Duration text (for example P1Y2M or PT1H)
        value: String,
    },
    /// Print a boolean data value
    Boolean {
        /// Boolean value (defaults to false)
        value: Option<bool>,
    },
}

#[derive(Debug, Serialize)]
struct DateReport {
    date: DvDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    precision: Option<DatePrecision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<DatePattern>,
}

#[derive(Debug, Serialize)]
struct DurationReport {
    duration: DvDuration,
    nominal: bool,
    /// Exact length in seconds, when the duration has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_length_seconds: Option<f64>,
}

fn date_report(
    value: &str,
    accuracy: Option<&str>,
    pattern: Option<&str>,
    conform: bool,
) -> Result<DateReport> {
    let pattern = pattern.map(DatePattern::parse).transpose()?;
    let date = match &pattern {
        Some(pattern) if conform => pattern.conform_text(value, accuracy)?,
        Some(pattern) => pattern.parse_date(value, accuracy)?,
        None => DvDate::parse(value, accuracy)?,
    };

    Ok(DateReport {
        precision: date.precision(),
        date,
        pattern,
    })
}

fn duration_report(value: &str) -> Result<DurationReport> {
    let duration = DvDuration::parse(value)?;
    let fixed_length_seconds = duration
        .fixed_length()
        .and_then(|d| d.to_std().ok())
        .map(|d| d.as_secs_f64());
    Ok(DurationReport {
        nominal: duration.is_nominal(),
        fixed_length_seconds,
        duration,
    })
}

fn render<T: Serialize>(value: &T, output: OutputFormat) -> Result<String> {
    Ok(match output {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
    })
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = CliConfig::from_env(cli.output)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(config.log_filter())?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let rendered = match cli.command {
        Commands::Date {
            value,
            accuracy,
            pattern,
            conform,
        } => {
            let report =
                date_report(&value, accuracy.as_deref(), pattern.as_deref(), conform)?;
            tracing::debug!(value = %value, precision = ?report.precision, "parsed date");
            render(&report, config.output())?
        }
        Commands::Duration { value } => render(&duration_report(&value)?, config.output())?,
        Commands::Boolean { value } => {
            let flag = value.map(DvBoolean::new).unwrap_or_default();
            render(&flag, config.output())?
        }
    };

    print!("{rendered}");
    if config.output() == OutputFormat::Json {
        println!();
    }
    Ok(())
}
