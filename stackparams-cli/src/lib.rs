use std::io;
use std::path::PathBuf;

use stackparams_types::resolution::ResolveError;
use stackparams_types::template::ParseTemplateError;
use stackparams_types::values::lookup::LookupError;
use stackparams_types::values::{MalformedOverride, ParseValuesError};

pub mod commands;
pub mod parameter_store;
pub mod settings;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] ParseTemplateError),
    #[error(transparent)]
    Values(#[from] ParseValuesError),
    #[error(transparent)]
    MalformedOverride(#[from] MalformedOverride),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("cannot read {description}: {}", path.display())]
    ReadFile { description: &'static str, path: PathBuf, #[source] source: io::Error },
    #[error("Failed to serialize output: {source}")]
    Serialize { #[from] source: serde_json::Error },
}
