//! RM `DV_BOOLEAN`.

use serde::{Deserialize, Serialize};

/// A boolean data value. The default is `false`, never "unset".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DvBoolean {
    value: bool,
}

impl DvBoolean {
    pub fn new(value: bool) -> Self {
        Self { value }
    }

    pub fn value(&self) -> bool {
        self.value
    }
}

impl From<bool> for DvBoolean {
    fn from(value: bool) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_false() {
        assert!(!DvBoolean::default().value());
    }

    #[test]
    fn wire_shape_is_value_mapping() {
        let yaml = serde_yaml::to_string(&DvBoolean::new(true)).expect("serialise");
        assert_eq!(yaml.trim(), "value: true");

        let parsed: DvBoolean = serde_yaml::from_str("value: false").expect("deserialise");
        assert_eq!(parsed, DvBoolean::from(false));

        assert!(serde_yaml::from_str::<DvBoolean>("value: true\nnull_flavour: x").is_err());
    }
}
