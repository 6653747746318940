//! openEHR data value support.
//!
//! This crate implements the RM `DV_*` primitives needed to carry partial dates and their
//! accuracy: ISO-8601 durations, partial calendar dates, `C_DATE` patterns and booleans. Every
//! value is validated when it is built and is immutable afterwards.
//!
//! Archetype validation, the full RM composition envelope and terminology binding live outside
//! this crate; they construct and read values through the operations exposed here.

pub mod data_types;
pub mod error;
pub mod wire;

pub use data_types::{
    DateNotation, DatePattern, DatePrecision, DurationComponents, DurationField, DvBoolean,
    DvDate, DvDuration, FieldState,
};
pub use error::{FormatError, FormatProblem, OpenEhrError, OpenEhrResult, ParseStage};

/// Read an RM `DV_DATE` from YAML.
pub fn read_dv_date_yaml(yaml: &str) -> OpenEhrResult<DvDate> {
    wire::read_yaml("DV_DATE", yaml)
}

/// Write an RM `DV_DATE` to YAML.
pub fn write_dv_date_yaml(date: &DvDate) -> OpenEhrResult<String> {
    wire::write_yaml(date)
}

/// Read an RM `DV_DURATION` from YAML.
pub fn read_dv_duration_yaml(yaml: &str) -> OpenEhrResult<DvDuration> {
    wire::read_yaml("DV_DURATION", yaml)
}

/// Write an RM `DV_DURATION` to YAML.
pub fn write_dv_duration_yaml(duration: &DvDuration) -> OpenEhrResult<String> {
    wire::write_yaml(duration)
}
