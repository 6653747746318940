//! OpenEHR RM data value types.
//!
//! Immutable, self-validating representations of the RM `DV_*` primitives used for dates and
//! durations:
//!
//! - [`DvBoolean`]: RM `DV_BOOLEAN`.
//! - [`DvDuration`]: an ISO-8601 duration (`P1Y2M`, `PT1H`, `P2W`).
//! - [`DvDate`]: a partial calendar date (`2021`, `2021-08`, `2021-08-06`) with an optional
//!   [`DvDuration`] accuracy.
//! - [`DatePattern`]: a `C_DATE` pattern (`yyyy-mm-??`) constraining which date fields appear.
//!
//! Values are constructed once through their parsing operations and never mutated, so they can
//! be shared freely between threads.

mod date_pattern;
mod dv_boolean;
mod dv_date;
mod dv_duration;

pub use date_pattern::{DatePattern, FieldState};
pub use dv_boolean::DvBoolean;
pub use dv_date::{DateNotation, DatePrecision, DvDate};
pub use dv_duration::{DurationComponents, DurationField, DvDuration};
