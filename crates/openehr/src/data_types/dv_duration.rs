//! RM `DV_DURATION`: an ISO-8601 duration.
//!
//! Accepted forms are the calendar form `[-]PnYnMnDTnHnMnS` (any non-empty, ordered subset of the
//! components, fractional seconds allowed) and the week form `[-]PnW`. The two forms cannot be
//! mixed.
//!
//! # Ordering
//!
//! `DvDuration` is deliberately not `PartialOrd`. Years and months have no fixed length, so
//! `P1M` and `P30D` cannot be ranked without an anchor date. Use [`DvDuration::fixed_length`]
//! to compare durations that only carry fixed-length units.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{FormatError, FormatProblem, ParseStage};

const EXPECTED: &str = "an ISO-8601 duration such as P1Y2M3DT4H5M6.5S or P2W";

const SECONDS_PER_DAY: u64 = 86_400;
const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// One of the seven duration components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationField {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl DurationField {
    const ALL: [DurationField; 7] = [
        DurationField::Years,
        DurationField::Months,
        DurationField::Weeks,
        DurationField::Days,
        DurationField::Hours,
        DurationField::Minutes,
        DurationField::Seconds,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    fn designator(self) -> char {
        match self {
            DurationField::Years => 'Y',
            DurationField::Months | DurationField::Minutes => 'M',
            DurationField::Weeks => 'W',
            DurationField::Days => 'D',
            DurationField::Hours => 'H',
            DurationField::Seconds => 'S',
        }
    }

    fn is_time(self) -> bool {
        self >= DurationField::Hours
    }
}

/// Explicit component values for [`DvDuration::from_components`].
///
/// `None` means the component is absent; `Some(0)` is an explicit zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DurationComponents {
    pub negative: bool,
    pub years: Option<u64>,
    pub months: Option<u64>,
    pub weeks: Option<u64>,
    pub days: Option<u64>,
    pub hours: Option<u64>,
    pub minutes: Option<u64>,
    pub seconds: Option<u64>,
    /// Fractional part of the seconds component, in nanoseconds.
    pub nanoseconds: u32,
}

impl DurationComponents {
    fn get(&self, field: DurationField) -> Option<u64> {
        match field {
            DurationField::Years => self.years,
            DurationField::Months => self.months,
            DurationField::Weeks => self.weeks,
            DurationField::Days => self.days,
            DurationField::Hours => self.hours,
            DurationField::Minutes => self.minutes,
            DurationField::Seconds => self.seconds,
        }
    }

    fn set(&mut self, field: DurationField, value: u64) {
        let slot = match field {
            DurationField::Years => &mut self.years,
            DurationField::Months => &mut self.months,
            DurationField::Weeks => &mut self.weeks,
            DurationField::Days => &mut self.days,
            DurationField::Hours => &mut self.hours,
            DurationField::Minutes => &mut self.minutes,
            DurationField::Seconds => &mut self.seconds,
        };
        *slot = Some(value);
    }

    /// The components as ISO-8601 text, written out even when they break a duration rule.
    fn written(&self) -> String {
        let mut out = String::from(if self.negative { "-P" } else { "P" });
        let mut in_time = false;
        for field in DurationField::ALL {
            let value = match (field, self.get(field)) {
                (DurationField::Seconds, None) if self.nanoseconds > 0 => 0,
                (_, Some(value)) => value,
                (_, None) => continue,
            };
            if field.is_time() && !in_time {
                out.push('T');
                in_time = true;
            }
            out.push_str(&value.to_string());
            if field == DurationField::Seconds && self.nanoseconds > 0 {
                out.push_str(&format!(".{:09}", self.nanoseconds));
            }
            out.push(field.designator());
        }
        out
    }
}

/// Immutable, validated ISO-8601 duration.
///
/// Equality compares the numeric components and the sign. Which components were written
/// explicitly is remembered only so that an all-zero value keeps its unit when formatted
/// (`P0D` stays `P0D`), so `P0Y1M` and `P1M` are equal.
#[derive(Clone, Debug)]
pub struct DvDuration {
    negative: bool,
    values: [u64; 7],
    nanoseconds: u32,
    present: u8,
}

impl DvDuration {
    /// Parses an ISO-8601 duration string.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the text is empty, lacks the `P` designator, has no
    /// components, has components out of order, mixes the week form with other components, or
    /// contains any other token outside the grammar.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let fail = |problem| FormatError::new(ParseStage::Duration, text, problem, EXPECTED);
        let unexpected = |position: usize| {
            let token = text[position..].chars().next().map(String::from).unwrap_or_default();
            fail(FormatProblem::UnexpectedToken { token, position })
        };

        if text.is_empty() {
            return Err(fail(FormatProblem::Empty));
        }

        let bytes = text.as_bytes();
        let mut pos = 0;
        let mut components = DurationComponents::default();

        match bytes[0] {
            b'-' => {
                components.negative = true;
                pos = 1;
            }
            b'+' => pos = 1,
            _ => {}
        }

        if bytes.get(pos) != Some(&b'P') {
            return Err(fail(FormatProblem::MissingDesignator));
        }
        pos += 1;

        let mut in_time = false;
        let mut last: Option<DurationField> = None;

        while pos < bytes.len() {
            if bytes[pos] == b'T' {
                if in_time || pos + 1 == bytes.len() {
                    return Err(unexpected(pos));
                }
                in_time = true;
                pos += 1;
                continue;
            }

            let start = pos;
            while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos == start {
                return Err(unexpected(pos));
            }
            let whole = &text[start..pos];

            let mut fraction = None;
            if pos < bytes.len() && matches!(bytes[pos], b'.' | b',') {
                let fraction_start = pos;
                pos += 1;
                let digits_start = pos;
                while pos < bytes.len() && bytes[pos].is_ascii_digit() {
                    pos += 1;
                }
                if pos == digits_start {
                    return Err(unexpected(fraction_start));
                }
                fraction = Some((fraction_start, &text[digits_start..pos]));
            }

            if pos == bytes.len() {
                // digits without a unit designator
                return Err(fail(FormatProblem::UnexpectedToken {
                    token: text[start..].to_string(),
                    position: start,
                }));
            }

            let field = match (in_time, bytes[pos]) {
                (false, b'Y') => DurationField::Years,
                (false, b'M') => DurationField::Months,
                (false, b'W') => DurationField::Weeks,
                (false, b'D') => DurationField::Days,
                (true, b'H') => DurationField::Hours,
                (true, b'M') => DurationField::Minutes,
                (true, b'S') => DurationField::Seconds,
                _ => return Err(unexpected(pos)),
            };

            if last.is_some_and(|previous| field <= previous) {
                return Err(fail(FormatProblem::OutOfOrder {
                    designator: field.designator(),
                }));
            }

            if let Some((fraction_start, digits)) = fraction {
                if field != DurationField::Seconds {
                    return Err(unexpected(fraction_start));
                }
                components.nanoseconds =
                    parse_nanoseconds(digits).ok_or_else(|| fail(FormatProblem::Overflow))?;
            }

            let value = whole
                .parse::<u64>()
                .map_err(|_| fail(FormatProblem::Overflow))?;
            components.set(field, value);
            last = Some(field);
            pos += 1;
        }

        Self::build(components).map_err(fail)
    }

    /// Builds a duration from explicit component values.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if no component is present, if weeks are combined with any
    /// other component, or if `nanoseconds` is not below one second.
    pub fn from_components(components: DurationComponents) -> Result<Self, FormatError> {
        Self::build(components).map_err(|problem| {
            FormatError::new(
                ParseStage::Duration,
                components.written(),
                problem,
                EXPECTED,
            )
        })
    }

    fn build(mut components: DurationComponents) -> Result<Self, FormatProblem> {
        if components.nanoseconds >= NANOS_PER_SECOND {
            return Err(FormatProblem::Overflow);
        }
        if components.nanoseconds > 0 && components.seconds.is_none() {
            components.seconds = Some(0);
        }

        let mut values = [0; 7];
        let mut present = 0;
        for field in DurationField::ALL {
            if let Some(value) = components.get(field) {
                values[field as usize] = value;
                present |= field.bit();
            }
        }

        if present == 0 {
            return Err(FormatProblem::NoComponents);
        }
        if present & DurationField::Weeks.bit() != 0 && present != DurationField::Weeks.bit() {
            return Err(FormatProblem::MixedWeekForm);
        }

        let is_zero = values.iter().all(|v| *v == 0) && components.nanoseconds == 0;

        Ok(Self {
            negative: components.negative && !is_zero,
            values,
            nanoseconds: components.nanoseconds,
            present,
        })
    }

    /// Converts an exact chrono duration into `PnDTnHnMnS` form.
    pub fn from_chrono(duration: chrono::Duration) -> Self {
        let negative = duration < chrono::Duration::zero();
        let magnitude = duration.abs();
        let total = magnitude.num_seconds().unsigned_abs();
        let nanoseconds = magnitude.subsec_nanos().unsigned_abs();

        let mut components = DurationComponents {
            negative,
            nanoseconds,
            ..DurationComponents::default()
        };
        let days = total / SECONDS_PER_DAY;
        let hours = total % SECONDS_PER_DAY / 3600;
        let minutes = total % 3600 / 60;
        let seconds = total % 60;

        if days > 0 {
            components.days = Some(days);
        }
        if hours > 0 {
            components.hours = Some(hours);
        }
        if minutes > 0 {
            components.minutes = Some(minutes);
        }
        if seconds > 0 || nanoseconds > 0 || total == 0 {
            components.seconds = Some(seconds);
        }

        match Self::build(components) {
            Ok(duration) => duration,
            // Some field is always set and weeks never are, so this is unreachable.
            Err(problem) => {
                tracing::error!(%problem, ?duration, "chrono duration did not convert");
                Self::zero_seconds()
            }
        }
    }

    fn zero_seconds() -> Self {
        Self {
            negative: false,
            values: [0; 7],
            nanoseconds: 0,
            present: DurationField::Seconds.bit(),
        }
    }

    /// The canonical string form, as carried in RM `DV_DURATION.value`.
    pub fn value(&self) -> String {
        self.to_string()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn years(&self) -> u64 {
        self.values[DurationField::Years as usize]
    }

    pub fn months(&self) -> u64 {
        self.values[DurationField::Months as usize]
    }

    pub fn weeks(&self) -> u64 {
        self.values[DurationField::Weeks as usize]
    }

    pub fn days(&self) -> u64 {
        self.values[DurationField::Days as usize]
    }

    pub fn hours(&self) -> u64 {
        self.values[DurationField::Hours as usize]
    }

    pub fn minutes(&self) -> u64 {
        self.values[DurationField::Minutes as usize]
    }

    /// Whole seconds; see [`DvDuration::nanoseconds`] for the fraction.
    pub fn seconds(&self) -> u64 {
        self.values[DurationField::Seconds as usize]
    }

    pub fn nanoseconds(&self) -> u32 {
        self.nanoseconds
    }

    /// Seconds including the fractional part.
    pub fn fractional_seconds(&self) -> f64 {
        self.seconds() as f64 + f64::from(self.nanoseconds) / f64::from(NANOS_PER_SECOND)
    }

    /// Returns `true` if the component was written explicitly.
    pub fn has(&self, field: DurationField) -> bool {
        self.present & field.bit() != 0
    }

    /// The component values, with absent components as `None`.
    pub fn components(&self) -> DurationComponents {
        let mut components = DurationComponents {
            negative: self.negative,
            nanoseconds: self.nanoseconds,
            ..DurationComponents::default()
        };
        for field in DurationField::ALL {
            if self.has(field) {
                components.set(field, self.values[field as usize]);
            }
        }
        components
    }

    /// Returns `true` if the value carries years or months, which have no fixed length.
    pub fn is_nominal(&self) -> bool {
        self.years() != 0 || self.months() != 0
    }

    /// The exact length of this duration, counting a day as 24 hours.
    ///
    /// Returns `None` for nominal durations (non-zero years or months) and on overflow.
    pub fn fixed_length(&self) -> Option<chrono::Duration> {
        if self.is_nominal() {
            return None;
        }

        let signed = |value: u64| i64::try_from(value).ok();
        let total = chrono::Duration::try_weeks(signed(self.weeks())?)?
            .checked_add(&chrono::Duration::try_days(signed(self.days())?)?)?
            .checked_add(&chrono::Duration::try_hours(signed(self.hours())?)?)?
            .checked_add(&chrono::Duration::try_minutes(signed(self.minutes())?)?)?
            .checked_add(&chrono::Duration::try_seconds(signed(self.seconds())?)?)?
            .checked_add(&chrono::Duration::nanoseconds(i64::from(self.nanoseconds)))?;

        Some(if self.negative { -total } else { total })
    }

    fn comparison_key(&self) -> (bool, [u64; 7], u32) {
        (self.negative, self.values, self.nanoseconds)
    }
}

fn parse_nanoseconds(digits: &str) -> Option<u32> {
    if digits.len() > 9 {
        return None;
    }
    let scale = 10u32.pow(9 - digits.len() as u32);
    digits.parse::<u32>().ok().map(|n| n * scale)
}

impl PartialEq for DvDuration {
    fn eq(&self, other: &Self) -> bool {
        self.comparison_key() == other.comparison_key()
    }
}

impl Eq for DvDuration {}

impl Hash for DvDuration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparison_key().hash(state);
    }
}

impl fmt::Display for DvDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        let shown: Vec<DurationField> = DurationField::ALL
            .into_iter()
            .filter(|field| {
                self.values[*field as usize] != 0
                    || (*field == DurationField::Seconds && self.nanoseconds != 0)
            })
            .collect();

        // An all-zero value keeps its smallest written unit.
        let shown = if shown.is_empty() {
            DurationField::ALL
                .into_iter()
                .rev()
                .find(|field| self.has(*field))
                .into_iter()
                .collect()
        } else {
            shown
        };

        let mut in_time = false;
        for field in shown {
            if field.is_time() && !in_time {
                f.write_str("T")?;
                in_time = true;
            }
            write!(f, "{}", self.values[field as usize])?;
            if field == DurationField::Seconds && self.nanoseconds != 0 {
                let fraction = format!("{:09}", self.nanoseconds);
                write!(f, ".{}", fraction.trim_end_matches('0'))?;
            }
            write!(f, "{}", field.designator())?;
        }
        Ok(())
    }
}

impl FromStr for DvDuration {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct DurationWire {
    value: String,
}

impl Serialize for DvDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        DurationWire {
            value: self.to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DvDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = DurationWire::deserialize(deserializer)?;
        Self::parse(&wire.value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DvDuration {
        DvDuration::parse(text).expect("valid duration")
    }

    fn problem(text: &str) -> FormatProblem {
        DvDuration::parse(text)
            .expect_err("should reject")
            .problem
    }

    #[test]
    fn parses_full_calendar_form() {
        let d = parse("P1Y2M3DT4H5M6.25S");
        assert_eq!(d.years(), 1);
        assert_eq!(d.months(), 2);
        assert_eq!(d.weeks(), 0);
        assert_eq!(d.days(), 3);
        assert_eq!(d.hours(), 4);
        assert_eq!(d.minutes(), 5);
        assert_eq!(d.seconds(), 6);
        assert_eq!(d.nanoseconds(), 250_000_000);
        assert_eq!(d.fractional_seconds(), 6.25);
        assert!(!d.is_negative());
        assert_eq!(d.to_string(), "P1Y2M3DT4H5M6.25S");
    }

    #[test]
    fn single_time_component_keeps_its_form() {
        let d = parse("PT1H");
        assert_eq!(d.hours(), 1);
        assert_eq!(d.value(), "PT1H");
        assert!(d.has(DurationField::Hours));
        assert!(!d.has(DurationField::Days));
    }

    #[test]
    fn week_form() {
        let d = parse("P2W");
        assert_eq!(d.weeks(), 2);
        assert_eq!(d.to_string(), "P2W");
    }

    #[test]
    fn comma_decimal_separator_is_accepted() {
        assert_eq!(parse("PT0,5S"), parse("PT0.5S"));
        assert_eq!(parse("PT0,5S").to_string(), "PT0.5S");
    }

    #[test]
    fn sign_before_designator() {
        let d = parse("-P1D");
        assert!(d.is_negative());
        assert_eq!(d.to_string(), "-P1D");
        assert_eq!(parse("+P1D"), parse("P1D"));
    }

    #[test]
    fn negative_zero_is_zero() {
        let d = parse("-PT0S");
        assert!(!d.is_negative());
        assert_eq!(d, parse("PT0S"));
    }

    #[test]
    fn canonical_form_omits_zero_components() {
        assert_eq!(parse("P0Y1M").to_string(), "P1M");
        assert_eq!(parse("P1DT0H30M").to_string(), "P1DT30M");
        assert_eq!(parse("P0Y1M"), parse("P1M"));
    }

    #[test]
    fn all_zero_keeps_smallest_written_unit() {
        assert_eq!(parse("P0D").to_string(), "P0D");
        assert_eq!(parse("P0Y0DT0H").to_string(), "PT0H");
        assert_eq!(parse("PT0S").to_string(), "PT0S");
    }

    #[test]
    fn canonical_form_parses_back_to_equal_value() {
        for text in [
            "P1Y",
            "P1Y2M",
            "P3W",
            "PT36H",
            "P0Y0M1D",
            "-P1DT2H3M4.000005S",
            "PT0.1S",
            "P10Y0M0DT0H0M0S",
        ] {
            let d = parse(text);
            let again = parse(&d.to_string());
            assert_eq!(d, again, "round trip of {text}");
        }
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(problem(""), FormatProblem::Empty);
    }

    #[test]
    fn rejects_designator_without_components() {
        assert_eq!(problem("P"), FormatProblem::NoComponents);
        assert_eq!(problem("-P"), FormatProblem::NoComponents);
    }

    #[test]
    fn rejects_missing_designator() {
        assert_eq!(problem("1D"), FormatProblem::MissingDesignator);
        assert_eq!(problem("T1H"), FormatProblem::MissingDesignator);
    }

    #[test]
    fn rejects_dangling_time_designator() {
        assert!(matches!(
            problem("PT"),
            FormatProblem::UnexpectedToken { token, position: 1 } if token == "T"
        ));
        assert!(matches!(
            problem("P1DT"),
            FormatProblem::UnexpectedToken { token, position: 3 } if token == "T"
        ));
    }

    #[test]
    fn rejects_digits_without_unit() {
        assert!(matches!(
            problem("P12"),
            FormatProblem::UnexpectedToken { token, position: 1 } if token == "12"
        ));
    }

    #[test]
    fn rejects_components_out_of_order() {
        assert_eq!(problem("P1D1Y"), FormatProblem::OutOfOrder { designator: 'Y' });
        assert_eq!(problem("P1D1D"), FormatProblem::OutOfOrder { designator: 'D' });
        assert_eq!(problem("PT1S1H"), FormatProblem::OutOfOrder { designator: 'H' });
    }

    #[test]
    fn rejects_time_units_in_date_part() {
        assert!(matches!(
            problem("P1H"),
            FormatProblem::UnexpectedToken { token, position: 2 } if token == "H"
        ));
        assert!(matches!(
            problem("PT1D"),
            FormatProblem::UnexpectedToken { token, position: 3 } if token == "D"
        ));
    }

    #[test]
    fn rejects_mixed_week_form() {
        assert_eq!(problem("P1W2D"), FormatProblem::MixedWeekForm);
        assert_eq!(problem("P1WT1H"), FormatProblem::MixedWeekForm);
    }

    #[test]
    fn rejects_fraction_outside_seconds() {
        assert!(matches!(
            problem("PT1.5H"),
            FormatProblem::UnexpectedToken { token, position: 3 } if token == "."
        ));
    }

    #[test]
    fn rejects_unknown_designator_and_non_ascii() {
        assert!(matches!(
            problem("P1X"),
            FormatProblem::UnexpectedToken { token, .. } if token == "X"
        ));
        assert!(matches!(
            problem("P1é"),
            FormatProblem::UnexpectedToken { token, position: 2 } if token == "é"
        ));
    }

    #[test]
    fn rejects_overflowing_values() {
        assert_eq!(problem("P99999999999999999999D"), FormatProblem::Overflow);
        assert_eq!(problem("PT1.0123456789S"), FormatProblem::Overflow);
    }

    #[test]
    fn error_carries_input_and_stage() {
        let err = DvDuration::parse("P1X").expect_err("should reject");
        assert_eq!(err.input, "P1X");
        assert_eq!(err.stage, ParseStage::Duration);
        assert!(err.expected.contains("ISO-8601 duration"));
    }

    #[test]
    fn from_components_enforces_invariants() {
        let err = DvDuration::from_components(DurationComponents::default())
            .expect_err("no components");
        assert_eq!(err.problem, FormatProblem::NoComponents);

        let err = DvDuration::from_components(DurationComponents {
            weeks: Some(1),
            days: Some(1),
            ..DurationComponents::default()
        })
        .expect_err("mixed weeks");
        assert_eq!(err.problem, FormatProblem::MixedWeekForm);
        assert_eq!(err.input, "P1W1D");

        let err = DvDuration::from_components(DurationComponents::default())
            .expect_err("no components");
        assert_eq!(err.input, "P");

        let err = DvDuration::from_components(DurationComponents {
            negative: true,
            minutes: Some(2),
            nanoseconds: 1_000_000_000,
            ..DurationComponents::default()
        })
        .expect_err("nanoseconds overflow");
        assert_eq!(err.problem, FormatProblem::Overflow);
        assert_eq!(err.input, "-PT2M0.1000000000S");

        let d = DvDuration::from_components(DurationComponents {
            hours: Some(1),
            nanoseconds: 500_000_000,
            ..DurationComponents::default()
        })
        .expect("valid components");
        assert_eq!(d.to_string(), "PT1H0.5S");
    }

    #[test]
    fn components_reports_presence() {
        let components = parse("P0Y1M").components();
        assert_eq!(components.years, Some(0));
        assert_eq!(components.months, Some(1));
        assert_eq!(components.days, None);
    }

    #[test]
    fn fixed_length_only_for_non_nominal_values() {
        assert_eq!(parse("P1M").fixed_length(), None);
        assert_eq!(parse("P1Y").fixed_length(), None);
        assert_eq!(
            parse("P1DT1H").fixed_length(),
            Some(chrono::Duration::hours(25))
        );
        assert_eq!(parse("P1W").fixed_length(), Some(chrono::Duration::days(7)));
        assert_eq!(
            parse("-PT1.5S").fixed_length(),
            Some(-chrono::Duration::milliseconds(1500))
        );
        // Zero calendar units do not make a value nominal.
        assert_eq!(parse("P0Y2D").fixed_length(), Some(chrono::Duration::days(2)));
    }

    #[test]
    fn from_chrono_uses_day_time_form() {
        let d = DvDuration::from_chrono(chrono::Duration::seconds(90_061));
        assert_eq!(d.to_string(), "P1DT1H1M1S");

        let d = DvDuration::from_chrono(-chrono::Duration::milliseconds(250));
        assert_eq!(d.to_string(), "-PT0.25S");

        let d = DvDuration::from_chrono(chrono::Duration::zero());
        assert_eq!(d.to_string(), "PT0S");
        assert!(!d.is_negative());
        assert!(d.has(DurationField::Seconds));

        let d = DvDuration::from_chrono(chrono::Duration::hours(-48));
        assert_eq!(d.to_string(), "-P2D");
        assert!(d.has(DurationField::Days));
        assert!(!d.has(DurationField::Seconds));
        assert_eq!(d.fixed_length(), Some(chrono::Duration::hours(-48)));
    }

    #[test]
    fn serde_uses_value_wrapper() {
        let yaml = serde_yaml::to_string(&parse("PT1H")).expect("serialise");
        assert_eq!(yaml.trim(), "value: PT1H");

        let d: DvDuration = serde_yaml::from_str("value: P2W").expect("deserialise");
        assert_eq!(d.weeks(), 2);

        let err = serde_yaml::from_str::<DvDuration>("value: P").expect_err("invalid value");
        assert!(err.to_string().contains("no components present"));
    }
}
