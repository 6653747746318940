//! YAML wire helpers for data values.
//!
//! Data values serialise in their RM shape (`value:` plus `accuracy:` for dates). Reading goes
//! through the same validating constructors as parsing, so a value read from YAML is as trusted
//! as one built in code.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{OpenEhrError, OpenEhrResult};

/// Strictly parse a data value of RM type `rm_type` from YAML text.
///
/// `serde_path_to_error` is used to report the failing field (e.g. `accuracy.value`) when the
/// YAML does not match the expected shape or a value fails validation.
///
/// # Errors
///
/// Returns [`OpenEhrError::Translation`] naming the RM type and the failing path.
pub fn read_yaml<T: DeserializeOwned>(rm_type: &str, yaml_text: &str) -> OpenEhrResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    match serde_path_to_error::deserialize(deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(OpenEhrError::Translation(format!(
                "{rm_type} schema mismatch at {path}: {source}"
            )))
        }
    }
}

/// Write a data value to YAML.
///
/// # Errors
///
/// Returns [`OpenEhrError::InvalidYaml`] if serialisation fails.
pub fn write_yaml<T: Serialize>(value: &T) -> OpenEhrResult<String> {
    Ok(serde_yaml::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::{DvDate, DvDuration};

    #[test]
    fn reads_date_with_accuracy() {
        let date: DvDate = read_yaml("DV_DATE", "value: '2021-08'\naccuracy:\n  value: P1M\n")
            .expect("valid yaml");
        assert_eq!(date.value().as_deref(), Some("2021-08"));
        assert_eq!(date.accuracy().map(DvDuration::months), Some(1));
    }

    #[test]
    fn reports_path_of_invalid_nested_value() {
        let err = read_yaml::<DvDate>("DV_DATE", "value: '2021-08'\naccuracy:\n  value: 1M\n")
            .expect_err("bad accuracy");
        let msg = err.to_string();
        assert!(msg.contains("DV_DATE schema mismatch at accuracy"), "{msg}");
        assert!(msg.contains("missing leading 'P' designator"), "{msg}");
    }

    #[test]
    fn reports_unknown_fields() {
        let err = read_yaml::<DvDuration>("DV_DURATION", "value: PT1H\nmagnitude: 3600\n")
            .expect_err("unknown key");
        assert!(matches!(err, OpenEhrError::Translation(msg) if msg.contains("magnitude")));
    }

    #[test]
    fn write_then_read_is_stable() {
        let date = DvDate::parse("2020-01-01", Some("PT1H")).expect("valid");
        let yaml = write_yaml(&date).expect("serialise");
        let back: DvDate = read_yaml("DV_DATE", &yaml).expect("reparse");
        assert_eq!(back, date);
    }
}
