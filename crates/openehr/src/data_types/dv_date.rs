//! RM `DV_DATE`: a partial ISO-8601 calendar date with optional accuracy.
//!
//! A date may stop at the year (`2021`), the month (`2021-08`) or the day (`2021-08-06`). The
//! precision is remembered and the value is always reproduced with exactly the fields that were
//! supplied. The basic notation (`202108`, `20210806`) is accepted and kept as written.
//!
//! Missing month or day fields are never invented by [`DvDate::value`]. Back-filling is an
//! explicit step: see [`DvDate::to_naive_date`] and
//! [`DatePattern::conform`](crate::data_types::DatePattern::conform).

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::data_types::DvDuration;
use crate::error::{FormatError, FormatProblem, ParseStage};

const EXPECTED: &str = "a date as YYYY, YYYY-MM, YYYY-MM-DD, YYYYMM or YYYYMMDD";

/// How many calendar fields a date carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// ISO-8601 notation a date was written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DateNotation {
    /// Dash-separated, e.g. `2021-08-06`.
    Extended,
    /// No separators, e.g. `20210806`.
    Basic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct PartialDate {
    year: u16,
    month: Option<u8>,
    day: Option<u8>,
    notation: DateNotation,
}

impl PartialDate {
    fn precision(&self) -> DatePrecision {
        match (self.month, self.day) {
            (None, _) => DatePrecision::Year,
            (Some(_), None) => DatePrecision::Month,
            (Some(_), Some(_)) => DatePrecision::Day,
        }
    }

    fn format(&self) -> String {
        let separator = match self.notation {
            DateNotation::Extended => "-",
            DateNotation::Basic => "",
        };
        let mut out = format!("{:04}", self.year);
        if let Some(month) = self.month {
            out.push_str(separator);
            out.push_str(&format!("{month:02}"));
        }
        if let Some(day) = self.day {
            out.push_str(separator);
            out.push_str(&format!("{day:02}"));
        }
        out
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct DateValue {
    date: PartialDate,
    accuracy: Option<DvDuration>,
}

/// Immutable `DV_DATE` value.
///
/// Either empty (no value and no accuracy) or a validated partial date with an optional
/// accuracy. An accuracy can never exist without a date.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DvDate {
    inner: Option<DateValue>,
}

impl DvDate {
    /// A date with no value set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a date and an optional accuracy duration.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] with stage [`ParseStage::Date`] if the date text does not
    /// match a supported shape or names a day that does not exist, and with stage
    /// [`ParseStage::Accuracy`] if the accuracy is not a valid ISO-8601 duration.
    pub fn parse(text: &str, accuracy: Option<&str>) -> Result<Self, FormatError> {
        let date = parse_partial_date(text)?;
        let accuracy = accuracy
            .map(|raw| DvDuration::parse(raw).map_err(|e| e.at_stage(ParseStage::Accuracy)))
            .transpose()?;

        Ok(Self {
            inner: Some(DateValue { date, accuracy }),
        })
    }

    /// Like [`DvDate::parse`], but the date itself may be absent.
    ///
    /// With neither argument the result is [`DvDate::empty`].
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`DvDate::parse`], fails with
    /// [`FormatProblem::AccuracyWithoutValue`] when only an accuracy is supplied.
    pub fn parse_optional(text: Option<&str>, accuracy: Option<&str>) -> Result<Self, FormatError> {
        match (text, accuracy) {
            (Some(text), accuracy) => Self::parse(text, accuracy),
            (None, None) => Ok(Self::empty()),
            (None, Some(accuracy)) => Err(accuracy_without_value(accuracy)),
        }
    }

    /// Parses a date and attaches an already-built accuracy.
    pub fn new(text: &str, accuracy: Option<DvDuration>) -> Result<Self, FormatError> {
        let date = parse_partial_date(text)?;
        Ok(Self {
            inner: Some(DateValue { date, accuracy }),
        })
    }

    /// Builds a date from numeric parts; the precision follows from which parts are given.
    ///
    /// # Errors
    ///
    /// Fails if the year is outside `0..=9999`, a day is given without a month, or the parts
    /// do not name a real calendar date.
    pub fn from_parts(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self, FormatError> {
        let input = || match (month, day) {
            (None, None) => format!("{year}"),
            (Some(m), None) => format!("{year}-{m}"),
            (m, Some(d)) => format!(
                "{year}-{}-{d}",
                m.map_or_else(|| "?".to_string(), |m| m.to_string())
            ),
        };
        let invalid = |reason: String| {
            FormatError::new(
                ParseStage::Date,
                input(),
                FormatProblem::InvalidCalendarDate { reason },
                EXPECTED,
            )
        };

        let year = u16::try_from(year)
            .ok()
            .filter(|y| *y <= 9999)
            .ok_or_else(|| invalid(format!("year {year} is outside 0-9999")))?;
        if month.is_none() && day.is_some() {
            return Err(invalid("day given without a month".into()));
        }

        check_calendar(year, month, day).map_err(invalid)?;

        // Both fit in a byte once the calendar check has passed.
        let date = PartialDate {
            year,
            month: month.map(|m| m as u8),
            day: day.map(|d| d as u8),
            notation: DateNotation::Extended,
        };

        Ok(Self {
            inner: Some(DateValue {
                date,
                accuracy: None,
            }),
        })
    }

    /// Returns a copy of this date with `accuracy` attached.
    ///
    /// # Errors
    ///
    /// Fails with [`FormatProblem::AccuracyWithoutValue`] if this date is empty.
    pub fn with_accuracy(&self, accuracy: DvDuration) -> Result<Self, FormatError> {
        match &self.inner {
            Some(value) => Ok(Self {
                inner: Some(DateValue {
                    date: value.date,
                    accuracy: Some(accuracy),
                }),
            }),
            None => Err(accuracy_without_value(&accuracy.to_string())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// The date text at its stored precision, or `None` for an empty date.
    pub fn value(&self) -> Option<String> {
        self.inner.as_ref().map(|v| v.date.format())
    }

    pub fn accuracy(&self) -> Option<&DvDuration> {
        self.inner.as_ref().and_then(|v| v.accuracy.as_ref())
    }

    pub fn precision(&self) -> Option<DatePrecision> {
        self.inner.as_ref().map(|v| v.date.precision())
    }

    pub fn notation(&self) -> Option<DateNotation> {
        self.inner.as_ref().map(|v| v.date.notation)
    }

    pub fn year(&self) -> Option<i32> {
        self.inner.as_ref().map(|v| i32::from(v.date.year))
    }

    pub fn month(&self) -> Option<u32> {
        self.inner.as_ref().and_then(|v| v.date.month).map(u32::from)
    }

    pub fn day(&self) -> Option<u32> {
        self.inner.as_ref().and_then(|v| v.date.day).map(u32::from)
    }

    /// The date with missing month and day back-filled with 1.
    ///
    /// Returns `None` for an empty date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        let date = &self.inner.as_ref()?.date;
        NaiveDate::from_ymd_opt(
            i32::from(date.year),
            date.month.map_or(1, u32::from),
            date.day.map_or(1, u32::from),
        )
    }

    /// Rebuilds this date keeping only the given fields, in the given notation.
    ///
    /// Missing fields that are asked for are back-filled with 1.
    pub(crate) fn reshaped(&self, precision: DatePrecision, notation: DateNotation) -> Self {
        let Some(value) = &self.inner else {
            return Self::empty();
        };
        let date = PartialDate {
            year: value.date.year,
            month: (precision >= DatePrecision::Month).then(|| value.date.month.unwrap_or(1)),
            day: (precision == DatePrecision::Day).then(|| value.date.day.unwrap_or(1)),
            notation,
        };
        Self {
            inner: Some(DateValue {
                date,
                accuracy: value.accuracy.clone(),
            }),
        }
    }
}

fn accuracy_without_value(accuracy: &str) -> FormatError {
    FormatError::new(
        ParseStage::Date,
        accuracy,
        FormatProblem::AccuracyWithoutValue,
        EXPECTED,
    )
}

fn parse_partial_date(text: &str) -> Result<PartialDate, FormatError> {
    let fail = |problem| FormatError::new(ParseStage::Date, text, problem, EXPECTED);
    let unexpected = |position: usize| {
        let token = text[position..]
            .chars()
            .next()
            .map_or_else(|| "end of input".to_string(), String::from);
        fail(FormatProblem::UnexpectedToken { token, position })
    };
    let bytes = text.as_bytes();
    let number = |from: usize, width: usize| -> Result<u16, FormatError> {
        let mut value = 0u16;
        for position in from..from + width {
            match bytes.get(position) {
                Some(b) if b.is_ascii_digit() => value = value * 10 + u16::from(b - b'0'),
                _ => return Err(unexpected(position)),
            }
        }
        Ok(value)
    };

    if text.is_empty() {
        return Err(fail(FormatProblem::Empty));
    }

    let year = number(0, 4)?;
    let mut date = PartialDate {
        year,
        month: None,
        day: None,
        notation: DateNotation::Extended,
    };

    match bytes.get(4) {
        None => {}
        Some(b'-') => {
            date.month = Some(number(5, 2)? as u8);
            match bytes.get(7) {
                None => {}
                Some(b'-') => {
                    date.day = Some(number(8, 2)? as u8);
                    if bytes.len() > 10 {
                        return Err(unexpected(10));
                    }
                }
                Some(_) => return Err(unexpected(7)),
            }
        }
        Some(b) if b.is_ascii_digit() => {
            date.notation = DateNotation::Basic;
            date.month = Some(number(4, 2)? as u8);
            // YYYYMM is what a basic pattern such as yyyy??XX leaves behind.
            if bytes.len() > 6 {
                date.day = Some(number(6, 2)? as u8);
                if bytes.len() > 8 {
                    return Err(unexpected(8));
                }
            }
        }
        Some(_) => return Err(unexpected(4)),
    }

    check_calendar(
        date.year,
        date.month.map(u32::from),
        date.day.map(u32::from),
    )
    .map_err(|reason| fail(FormatProblem::InvalidCalendarDate { reason }))?;
    Ok(date)
}

fn check_calendar(year: u16, month: Option<u32>, day: Option<u32>) -> Result<(), String> {
    let Some(month) = month else {
        return Ok(());
    };
    if !(1..=12).contains(&month) {
        return Err(format!("month {month} is outside 1-12"));
    }
    if let Some(day) = day {
        if NaiveDate::from_ymd_opt(i32::from(year), month, day).is_none() {
            return Err(format!("day {day} does not exist in {year:04}-{month:02}"));
        }
    }
    Ok(())
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct DateWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    accuracy: Option<DvDuration>,
}

impl Serialize for DvDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        DateWire {
            value: self.value(),
            accuracy: self.accuracy().cloned(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DvDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = DateWire::deserialize(deserializer)?;
        let parsed = match (wire.value, wire.accuracy) {
            (Some(value), accuracy) => Self::new(&value, accuracy),
            (None, None) => Ok(Self::empty()),
            (None, Some(accuracy)) => Err(accuracy_without_value(&accuracy.to_string())),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
