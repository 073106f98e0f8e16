pub mod lookup;
mod yaml;

use std::collections::BTreeMap;
use std::str::FromStr;

/// Parameter values (or tags) by name, as supplied by the caller.
pub type ValueMap = BTreeMap<String, String>;

/// A single value from a value file, before external references have been looked up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValueNode {
    Literal(String),
    /// The name under which the value is stored in an external parameter store.
    ExternalRef(String),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValueDocument {
    entries: BTreeMap<String, ValueNode>,
}

impl ValueDocument {
    pub fn new(entries: BTreeMap<String, ValueNode>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, ValueNode> {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseValuesError {
    #[error("Failed to parse values, due to: {cause}")]
    IllegalYamlValues { cause: serde_yaml::Error },
    #[error("Values must be given as a YAML mapping!")]
    IllegalValuesStructure,
    #[error("Key '{key}' is not a valid name!")]
    IllegalValueKey { key: String },
    #[error("Value of '{name}' must be a scalar!")]
    NonScalarValue { name: String },
    #[error("Value of '{name}' uses unsupported tag '{tag}'!")]
    UnsupportedTag { name: String, tag: String },
}

/// A `Key=value` token given on the command line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValueOverride {
    pub name: String,
    pub value: String,
}

impl FromStr for ValueOverride {
    type Err = MalformedOverride;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.split_once('=') {
            Some((name, value)) if !name.is_empty() => {
                Ok(Self { name: String::from(name), value: String::from(value) })
            }
            _ => Err(MalformedOverride { token: String::from(token) }),
        }
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("expected Key=value, got '{token}'")]
pub struct MalformedOverride {
    pub token: String,
}

/// Merges the values from a value file with the overrides from the command line.
///
/// Overrides are applied in the given order and replace any earlier value for the same name.
pub fn merge_values<S: AsRef<str>>(file: ValueMap, overrides: &[S]) -> Result<ValueMap, MalformedOverride> {
    let mut values = file;
    for token in overrides {
        let ValueOverride { name, value } = ValueOverride::from_str(token.as_ref())?;
        values.insert(name, value);
    }
    Ok(values)
}
