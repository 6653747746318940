//! Error types for openEHR data value parsing.
//!
//! Every textual parse in this crate fails with a [`FormatError`]. It always carries the raw
//! input, the stage that rejected it and a description of the accepted shape, so callers can
//! report a useful message without re-inspecting the text.

use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// The parsing stage that rejected an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseStage {
    /// An ISO-8601 duration (`DV_DURATION`).
    Duration,
    /// A partial ISO-8601 calendar date (`DV_DATE`).
    Date,
    /// The accuracy duration attached to a date.
    Accuracy,
    /// A `C_DATE` pattern constraint such as `yyyy-mm-??`.
    DatePattern,
}

impl fmt::Display for ParseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseStage::Duration => "duration",
            ParseStage::Date => "date",
            ParseStage::Accuracy => "accuracy",
            ParseStage::DatePattern => "date pattern",
        };
        f.write_str(name)
    }
}

/// What was wrong with the input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatProblem {
    #[error("input is empty")]
    Empty,

    #[error("unexpected '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    #[error("missing leading 'P' designator")]
    MissingDesignator,

    #[error("no components present")]
    NoComponents,

    #[error("week form cannot be combined with other components")]
    MixedWeekForm,

    #[error("component '{designator}' is out of order or repeated")]
    OutOfOrder { designator: char },

    #[error("numeric value is too large")]
    Overflow,

    #[error("invalid calendar date: {reason}")]
    InvalidCalendarDate { reason: String },

    #[error("accuracy supplied without a date value")]
    AccuracyWithoutValue,

    #[error("{field} is {state} by the pattern")]
    PatternMismatch {
        field: &'static str,
        state: &'static str,
    },
}

/// A rejected textual value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid {stage} '{input}': {problem} (expected {expected})")]
pub struct FormatError {
    /// The raw text that was rejected.
    pub input: String,
    pub stage: ParseStage,
    pub problem: FormatProblem,
    /// Human-readable description of the accepted shapes.
    pub expected: Cow<'static, str>,
}

impl FormatError {
    pub(crate) fn new(
        stage: ParseStage,
        input: impl Into<String>,
        problem: FormatProblem,
        expected: impl Into<Cow<'static, str>>,
    ) -> Self {
        let err = Self {
            input: input.into(),
            stage,
            problem,
            expected: expected.into(),
        };
        tracing::trace!(stage = %err.stage, input = %err.input, "rejected: {}", err.problem);
        err
    }

    /// Re-labels this error as belonging to a different stage, keeping the rest intact.
    pub(crate) fn at_stage(mut self, stage: ParseStage) -> Self {
        self.stage = stage;
        self
    }
}

/// Errors returned at the `openehr` crate boundary.
#[derive(Debug, Error)]
pub enum OpenEhrError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

pub type OpenEhrResult<T> = Result<T, OpenEhrError>;
