use serde::{Deserialize, Serialize};

use crate::values::{merge_values, MalformedOverride, ValueMap};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TagItem {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl TagItem {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

/// Collects the tags from a tags file, command line overrides and further values.
///
/// Later sources win for the same key, so every key appears exactly once.
/// Unlike parameters, there is no set of known names to check tags against.
///
/// `extra` is for callers embedding this crate, which add tags of their own on top.
/// The `stackparams` command line passes an empty map.
pub fn resolve_tags<S: AsRef<str>>(file: ValueMap, overrides: &[S], extra: ValueMap) -> Result<Vec<TagItem>, MalformedOverride> {
    let mut tags = merge_values(file, overrides)?;
    tags.extend(extra);

    let items = tags.into_iter()
        .map(|(key, value)| TagItem { key, value })
        .collect();
    Ok(items)
}
