use std::collections::HashMap;

use tracing::warn;

use crate::values::{ValueDocument, ValueMap, ValueNode};

/// Retrieves values which are stored outside of the value file, e.g. secrets.
pub trait ExternalValueLookup {
    fn lookup(&self, name: &str) -> Result<String, LookupError>;
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum LookupError {
    #[error("No external value found for '{name}'")]
    NotFound { name: String },
    #[error("Failed to look up external value '{name}': {details}")]
    Failed { name: String, details: String },
}

/// What to do when looking up an external value fails.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LookupFailurePolicy {
    /// Log a warning and use the empty string as value.
    #[default]
    SubstituteEmpty,
    /// Fail the whole run.
    Fail,
}

impl std::str::FromStr for LookupFailurePolicy {
    type Err = UnknownLookupFailurePolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "substitute-empty" => Ok(Self::SubstituteEmpty),
            "fail" => Ok(Self::Fail),
            other => Err(UnknownLookupFailurePolicy { value: String::from(other) }),
        }
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
#[error("Unknown lookup failure policy '{value}'. Expected 'substitute-empty' or 'fail'.")]
pub struct UnknownLookupFailurePolicy {
    pub value: String,
}

/// Serves external values from memory.
#[derive(Clone, Debug, Default)]
pub struct StaticLookup {
    values: HashMap<String, String>,
}

impl StaticLookup {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl ExternalValueLookup for StaticLookup {
    fn lookup(&self, name: &str) -> Result<String, LookupError> {
        self.values.get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound { name: String::from(name) })
    }
}

impl ValueDocument {

    /// Replaces every external reference with the value retrieved from `lookup`.
    pub fn resolve(self, lookup: &dyn ExternalValueLookup, on_failure: LookupFailurePolicy) -> Result<ValueMap, LookupError> {
        self.entries.into_iter()
            .map(|(name, node)| {
                let value = match node {
                    ValueNode::Literal(value) => value,
                    ValueNode::ExternalRef(reference) => {
                        match lookup.lookup(&reference) {
                            Ok(value) => value,
                            Err(cause) => match on_failure {
                                LookupFailurePolicy::SubstituteEmpty => {
                                    warn!("Using empty value for '{name}': {cause}");
                                    String::new()
                                }
                                LookupFailurePolicy::Fail => return Err(cause),
                            }
                        }
                    }
                };
                Ok((name, value))
            })
            .collect()
    }
}
