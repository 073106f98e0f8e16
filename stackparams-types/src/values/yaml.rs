use std::collections::BTreeMap;
use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value;

use crate::values::{ParseValuesError, ValueDocument, ValueNode};

const PARAMETER_STORE_TAG: &str = "ParameterStore";

impl ValueDocument {

    /// Reads a flat mapping of names to scalar values from the given string of YAML text.
    ///
    /// Scalars keep the text as written in the document, so `1.10` stays `1.10`.
    /// A scalar tagged with `!ParameterStore` names a value, which has to be looked up externally.
    ///
    /// # Example
    ///
    /// ```
    /// # use stackparams_types::values::{ValueDocument, ValueNode};
    /// # fn main() -> Result<(), stackparams_types::values::ParseValuesError> {
    /// let yaml = r#"
    /// ImageTag: 1.10
    /// Secret: !ParameterStore /path/to/secret
    /// "#;
    ///
    /// let document = ValueDocument::try_from_yaml_str(yaml)?;
    ///
    /// assert_eq!(document.entries()["ImageTag"], ValueNode::Literal(String::from("1.10")));
    /// assert_eq!(document.entries()["Secret"], ValueNode::ExternalRef(String::from("/path/to/secret")));
    ///
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_from_yaml_str(s: &str) -> Result<Self, ParseValuesError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let document = serde_yaml::from_str::<Value>(s)
            .map_err(|cause| ParseValuesError::IllegalYamlValues { cause })?;

        let mapping = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mapping) => mapping,
            _ => return Err(ParseValuesError::IllegalValuesStructure),
        };

        let kinds = mapping.into_iter()
            .map(|(key, value)| entry_kind(key, value))
            .collect::<Result<Vec<_>, _>>()?;

        // Typed values lose their notation, so the text is read in a second pass.
        let RawEntries(raw_entries) = serde_yaml::from_str::<RawEntries>(s)
            .map_err(|cause| ParseValuesError::IllegalYamlValues { cause })?;

        let entries = kinds.into_iter()
            .zip(raw_entries)
            .map(|(kind, (RawScalar(name), text))| {
                let text = text.map(|RawScalar(text)| text).unwrap_or_default();
                let node = match kind {
                    EntryKind::Literal => ValueNode::Literal(text),
                    EntryKind::ParameterStore => ValueNode::ExternalRef(text),
                };
                (name, node)
            })
            .collect::<BTreeMap<_, _>>();

        Ok(Self::new(entries))
    }
}

enum EntryKind {
    Literal,
    ParameterStore,
}

fn entry_kind(key: Value, value: Value) -> Result<EntryKind, ParseValuesError> {
    let name = match key {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => display_key(&key),
        other => return Err(ParseValuesError::IllegalValueKey { key: format!("{other:?}") }),
    };

    match value {
        Value::Tagged(tagged) => {
            let tag = tagged.tag.to_string();
            if tag.trim_start_matches('!') != PARAMETER_STORE_TAG {
                return Err(ParseValuesError::UnsupportedTag { name, tag });
            }
            if is_scalar(&tagged.value) {
                Ok(EntryKind::ParameterStore)
            } else {
                Err(ParseValuesError::NonScalarValue { name })
            }
        }
        value if is_scalar(&value) => Ok(EntryKind::Literal),
        _ => Err(ParseValuesError::NonScalarValue { name }),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))
}

fn display_key(key: &Value) -> String {
    match key {
        Value::Bool(key) => key.to_string(),
        Value::Number(key) => key.to_string(),
        Value::String(key) => Clone::clone(key),
        _ => String::new(),
    }
}

/// The entries of a mapping in document order, with every scalar as written.
struct RawEntries(Vec<(RawScalar, Option<RawScalar>)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of names to scalar values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<RawScalar, Option<RawScalar>>()? {
                    entries.push(entry);
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// A scalar read via `deserialize_str`, which yields the source text and ignores any tag.
struct RawScalar(String);

impl<'de> Deserialize<'de> for RawScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = RawScalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar value")
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(RawScalar(String::from(value)))
            }
        }

        deserializer.deserialize_str(ScalarVisitor)
    }
}
