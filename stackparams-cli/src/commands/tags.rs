use std::path::Path;

use tracing::debug;

use stackparams_types::tags::{resolve_tags, TagItem};
use stackparams_types::values::lookup::{ExternalValueLookup, LookupFailurePolicy};
use stackparams_types::values::{ValueDocument, ValueMap};

#[derive(Clone, Debug, Default)]
pub struct TagsInput {
    pub tags_body: String,
    /// `key=value` tokens in command line order.
    pub overrides: Vec<String>,
}

impl TagsInput {
    pub fn load(tags_file: &Path, overrides: Vec<String>) -> crate::Result<Self> {
        let tags_body = super::read_file(tags_file, "tags file")?;
        Ok(Self { tags_body, overrides })
    }
}

/// Renders the tags as a prettified JSON array.
pub fn render_tags(input: &TagsInput, lookup: &dyn ExternalValueLookup, on_failure: LookupFailurePolicy) -> crate::Result<String> {
    let file_tags = ValueDocument::try_from_yaml_str(&input.tags_body)?
        .resolve(lookup, on_failure)?;

    let tags: Vec<TagItem> = resolve_tags(file_tags, &input.overrides, ValueMap::new())?;
    debug!("Resolved {} tag(s).", tags.len());

    let json = serde_json::to_string_pretty(&tags)?;
    Ok(json)
}
