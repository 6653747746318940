//! `C_DATE` pattern constraints.
//!
//! Archetypes constrain which fields of a `DV_DATE` may or must be present with patterns such as
//! `yyyy-mm-dd`, `yyyy-mm-??` or `yyyy-??-XX`:
//!
//! - `mm` / `dd`: the field is mandatory
//! - `??`: the field is optional
//! - `XX`: the field is forbidden
//!
//! Patterns are case-insensitive. A trailing field that is left out (`yyyy-mm`) is forbidden, and
//! the basic form (`yyyymmdd`, `yyyy??XX`) requires values in basic notation.
//!
//! [`DatePattern::check`] validates strictly. [`DatePattern::conform`] is the lenient policy: it
//! truncates fields the pattern does not allow and back-fills mandatory ones with 1.
//! [`DatePattern::conform_text`] applies the same policy to text and also drops a well-formed
//! time of day (`2021-08-06T23:17:35Z` becomes `2021-08-06`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::data_types::{DateNotation, DatePrecision, DvDate};
use crate::error::{FormatError, FormatProblem, ParseStage};

const EXPECTED: &str = "a date pattern such as yyyy-mm-dd, yyyy-mm-??, yyyy-??-XX or yyyymmdd";
const EXPECTED_DATE_TIME: &str = "a date, optionally followed by a time such as T23:17:35Z";

/// Whether a pattern requires, allows or forbids a date field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldState {
    Mandatory,
    Optional,
    Forbidden,
}

impl FieldState {
    fn token(self, mandatory: &'static str) -> &'static str {
        match self {
            FieldState::Mandatory => mandatory,
            FieldState::Optional => "??",
            FieldState::Forbidden => "XX",
        }
    }
}

/// A parsed `C_DATE` pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DatePattern {
    month: FieldState,
    day: FieldState,
    notation: DateNotation,
}

impl DatePattern {
    /// Parses a pattern such as `yyyy-mm-??`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the pattern is not one of the supported shapes, or if the
    /// day is stricter than the month (for example `yyyy-??-dd` or `yyyy-XX-??`).
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let fail = |problem| FormatError::new(ParseStage::DatePattern, pattern, problem, EXPECTED);
        let unexpected = |position: usize| {
            let token = pattern[position..]
                .chars()
                .next()
                .map_or_else(|| "end of input".to_string(), String::from);
            fail(FormatProblem::UnexpectedToken { token, position })
        };

        if pattern.is_empty() {
            return Err(fail(FormatProblem::Empty));
        }

        let lower = pattern.to_ascii_lowercase();
        if let Some(position) = mismatch(&lower, 0, "yyyy") {
            return Err(unexpected(position));
        }

        let field = |at: usize, mandatory: &str| -> Result<FieldState, FormatError> {
            match lower.get(at..at + 2) {
                Some(token) if token == mandatory => Ok(FieldState::Mandatory),
                Some("??") => Ok(FieldState::Optional),
                Some("xx") => Ok(FieldState::Forbidden),
                _ => Err(unexpected(mismatch(&lower, at, mandatory).unwrap_or(at))),
            }
        };

        let (month, day, notation, end) = match lower.as_bytes().get(4) {
            None => (
                FieldState::Forbidden,
                FieldState::Forbidden,
                DateNotation::Extended,
                4,
            ),
            Some(b'-') => {
                let month = field(5, "mm")?;
                match lower.as_bytes().get(7) {
                    None => (month, FieldState::Forbidden, DateNotation::Extended, 7),
                    Some(b'-') => (month, field(8, "dd")?, DateNotation::Extended, 10),
                    Some(_) => return Err(unexpected(7)),
                }
            }
            Some(_) => (field(4, "mm")?, field(6, "dd")?, DateNotation::Basic, 8),
        };

        if lower.len() > end {
            return Err(unexpected(end));
        }
        if day < month {
            return Err(fail(FormatProblem::PatternMismatch {
                field: "day",
                state: "stricter than the month",
            }));
        }

        Ok(Self {
            month,
            day,
            notation,
        })
    }

    pub fn month(&self) -> FieldState {
        self.month
    }

    pub fn day(&self) -> FieldState {
        self.day
    }

    pub fn notation(&self) -> DateNotation {
        self.notation
    }

    /// Checks a date against this pattern without changing it.
    ///
    /// An empty date has nothing to constrain and always passes.
    ///
    /// # Errors
    ///
    /// Fails with [`FormatProblem::PatternMismatch`] if a mandatory field is missing, a
    /// forbidden field is present, or the notation differs from the pattern's.
    pub fn check(&self, date: &DvDate) -> Result<(), FormatError> {
        let Some(value) = date.value() else {
            return Ok(());
        };
        let reject = |field, state| {
            FormatError::new(
                ParseStage::Date,
                value.clone(),
                FormatProblem::PatternMismatch { field, state },
                format!("a date matching {self}"),
            )
        };

        self.check_notation(date).map_err(|state| reject("separator", state))?;

        for (field, state, present) in [
            ("month", self.month, date.month().is_some()),
            ("day", self.day, date.day().is_some()),
        ] {
            match (state, present) {
                (FieldState::Mandatory, false) => return Err(reject(field, "required")),
                (FieldState::Forbidden, true) => return Err(reject(field, "forbidden")),
                _ => {}
            }
        }
        Ok(())
    }

    /// Reshapes a date to fit this pattern.
    ///
    /// Fields the pattern forbids are dropped and missing mandatory fields are set to 1; optional
    /// fields are kept as they are. The accuracy is carried over unchanged.
    ///
    /// # Errors
    ///
    /// Fails if the date is written in a different notation than the pattern.
    pub fn conform(&self, date: &DvDate) -> Result<DvDate, FormatError> {
        let Some(precision) = date.precision() else {
            return Ok(DvDate::empty());
        };

        self.check_notation(date).map_err(|state| {
            FormatError::new(
                ParseStage::Date,
                date.value().unwrap_or_default(),
                FormatProblem::PatternMismatch {
                    field: "separator",
                    state,
                },
                format!("a date matching {self}"),
            )
        })?;

        let keeps = |state: FieldState, present: bool| match state {
            FieldState::Mandatory => true,
            FieldState::Optional => present,
            FieldState::Forbidden => false,
        };
        let keep_month = keeps(self.month, precision >= DatePrecision::Month);
        let keep_day = keep_month && keeps(self.day, precision == DatePrecision::Day);

        let target = match (keep_month, keep_day) {
            (_, true) => DatePrecision::Day,
            (true, false) => DatePrecision::Month,
            (false, false) => DatePrecision::Year,
        };
        let conformed = date.reshaped(target, self.notation);

        if conformed.value() != date.value() {
            tracing::debug!(
                pattern = %self,
                from = ?date.value(),
                to = ?conformed.value(),
                "date reshaped to pattern"
            );
        }
        Ok(conformed)
    }

    /// Lenient counterpart of [`DatePattern::parse_date`].
    ///
    /// A time of day after a complete extended date (`T23`, `T23:17:35.654Z`,
    /// `T01:17:35+04:00`) is dropped before the date is parsed and reshaped with
    /// [`DatePattern::conform`].
    ///
    /// # Errors
    ///
    /// Fails if the time suffix is malformed (`2021-08-06T`, `2021-08-06TZ`), if the date does
    /// not parse, or if [`DatePattern::conform`] rejects it.
    pub fn conform_text(&self, text: &str, accuracy: Option<&str>) -> Result<DvDate, FormatError> {
        let date_text = date_part(text)?;
        if date_text.len() < text.len() {
            tracing::debug!(
                pattern = %self,
                from = text,
                to = date_text,
                "time of day dropped from date"
            );
        }
        self.conform(&DvDate::parse(date_text, accuracy)?)
    }

    /// Parses a date (and optional accuracy) and checks it against this pattern.
    pub fn parse_date(&self, text: &str, accuracy: Option<&str>) -> Result<DvDate, FormatError> {
        let date = DvDate::parse(text, accuracy)?;
        self.check(&date)?;
        Ok(date)
    }

    fn check_notation(&self, date: &DvDate) -> Result<(), &'static str> {
        // Year-only values read the same in both notations.
        if date.precision() == Some(DatePrecision::Year) {
            return Ok(());
        }
        match (self.notation, date.notation()) {
            (DateNotation::Extended, Some(DateNotation::Basic)) => Err("required"),
            (DateNotation::Basic, Some(DateNotation::Extended)) => Err("forbidden"),
            _ => Ok(()),
        }
    }
}

/// The date part of an extended date-time, or `text` itself when no time follows the date.
fn date_part(text: &str) -> Result<&str, FormatError> {
    const DATE_LEN: usize = "yyyy-mm-dd".len();

    let bytes = text.as_bytes();
    if bytes.get(4) != Some(&b'-') || bytes.get(DATE_LEN) != Some(&b'T') {
        return Ok(text);
    }
    match check_time(bytes, DATE_LEN + 1) {
        Ok(()) => Ok(&text[..DATE_LEN]),
        Err(position) => {
            let token = text[position..]
                .chars()
                .next()
                .map_or_else(|| "end of input".to_string(), String::from);
            Err(FormatError::new(
                ParseStage::Date,
                text,
                FormatProblem::UnexpectedToken { token, position },
                EXPECTED_DATE_TIME,
            ))
        }
    }
}

/// Checks `hh[:mm[:ss[.fff]]][Z|+hh[:mm]|-hh[:mm]]` from `at` to the end of `bytes`.
///
/// Returns the position of the first offending byte.
fn check_time(bytes: &[u8], at: usize) -> Result<(), usize> {
    let mut at = two_digits(bytes, at, 24)?;
    let mut fields = 1;
    while fields < 3 && bytes.get(at) == Some(&b':') {
        at = two_digits(bytes, at + 1, if fields == 2 { 60 } else { 59 })?;
        fields += 1;
    }
    if fields == 3 && matches!(bytes.get(at), Some(b'.' | b',')) {
        let start = at + 1;
        at = start + bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();
        if at == start {
            return Err(at);
        }
    }

    match bytes.get(at) {
        None => Ok(()),
        Some(b'Z') if at + 1 == bytes.len() => Ok(()),
        Some(b'Z') => Err(at + 1),
        Some(b'+' | b'-') => {
            at = two_digits(bytes, at + 1, 23)?;
            if at < bytes.len() {
                let minutes = if bytes.get(at) == Some(&b':') { at + 1 } else { at };
                at = two_digits(bytes, minutes, 59)?;
            }
            if at == bytes.len() {
                Ok(())
            } else {
                Err(at)
            }
        }
        Some(_) => Err(at),
    }
}

/// Reads a two-digit field no larger than `max` and returns the position after it.
fn two_digits(bytes: &[u8], at: usize, max: u8) -> Result<usize, usize> {
    let mut value = 0u8;
    for position in at..at + 2 {
        match bytes.get(position) {
            Some(b) if b.is_ascii_digit() => value = value * 10 + (b - b'0'),
            _ => return Err(position),
        }
    }
    if value > max {
        return Err(at);
    }
    Ok(at + 2)
}

/// Position of the first character of `expected` that `text` does not match, starting at `at`.
fn mismatch(text: &str, at: usize, expected: &str) -> Option<usize> {
    expected
        .bytes()
        .enumerate()
        .find(|(i, b)| text.as_bytes().get(at + i) != Some(b))
        .map(|(i, _)| at + i)
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = match self.notation {
            DateNotation::Extended => "-",
            DateNotation::Basic => "",
        };
        write!(
            f,
            "yyyy{separator}{}{separator}{}",
            self.month.token("mm"),
            self.day.token("dd")
        )
    }
}

impl FromStr for DatePattern {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DatePattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DatePattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
