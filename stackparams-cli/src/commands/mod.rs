use std::fs;
use std::path::Path;

pub mod parameters;
pub mod tags;

pub(crate) fn read_file(path: &Path, description: &'static str) -> crate::Result<String> {
    fs::read_to_string(path)
        .map_err(|source| crate::Error::ReadFile { description, path: path.to_path_buf(), source })
}
