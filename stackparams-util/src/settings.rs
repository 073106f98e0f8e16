use std::fmt::Debug;
use std::path::PathBuf;
use std::str::FromStr;

pub use config::{Config, ConfigError, FileFormat};
use home::home_dir;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Failed to load config: {0}")]
    Config(#[from] ConfigError),
    #[error("Error while retrieving configured value for '{field}'")]
    ReadField { field: &'static str, #[source] source: Box<ConfigError> },
    #[error("Failed to parse field '{field}' with value '{value}': {details}")]
    ParseValue { field: &'static str, value: String, details: String },
}

#[derive(Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub config_files_used: Vec<PathBuf>,
    pub config_files_declared: Vec<PathBuf>,
}

impl Debug for LoadedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedConfig")
            .field("config", &self.config)
            .field("config_files_used", &self.config_files_used)
            .field("config_files_declared", &self.config_files_declared)
            .finish()
    }
}

impl LoadedConfig {

    /// Reads a string field, treating an empty string as not set.
    pub fn get_optional_string(&self, field: &'static str) -> Result<Option<String>, LoadError> {
        let value = self.config.get_string(field)
            .map_err(|source| LoadError::ReadField { field, source: Box::new(source) })?;
        Ok(Some(value).filter(|value| !value.is_empty()))
    }

    pub fn get_string(&self, field: &'static str) -> Result<String, LoadError> {
        self.config.get_string(field)
            .map_err(|source| LoadError::ReadField { field, source: Box::new(source) })
    }

    pub fn get_parsed<T>(&self, field: &'static str) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: ToString,
    {
        let value = self.get_string(field)?;
        T::from_str(&value)
            .map_err(|cause| LoadError::ParseValue { field, value, details: cause.to_string() })
    }
}

/// Load configuration from files and environment variables.
///
/// This includes in following order:
/// * A default configuration, provided as a string
/// * The file at the path given in the optional environment variable `{NAME}_CUSTOM_CONFIG_PATH`
/// * A system configuration, read from `/etc/{name}/config.toml`
/// * A user configuration, read from `[XDG_CONFIG_HOME|~/.config]/{name}/config.toml`
/// * Environment variables prefixed with `{NAME}_`
/// * The `overrides` passed as parameter.
///
/// Files which do not exist are skipped.
pub fn load_config(name: &str, defaults: &str, defaults_format: FileFormat, overrides: Config) -> Result<LoadedConfig, LoadError> {
    let config_files = declared_config_files(name);
    build_config(name, defaults, defaults_format, config_files, overrides)
}

fn declared_config_files(name: &str) -> Vec<Option<PathBuf>> {
    let mut config_files = Vec::new();

    let custom_config_path_env_key = format!("{}_CUSTOM_CONFIG_PATH", name.to_uppercase());
    if let Ok(config_path) = std::env::var(custom_config_path_env_key) {
        config_files.push(Some(PathBuf::from(config_path)));
    }

    config_files.push(Some(PathBuf::from(format!("/etc/{name}/config.toml"))));

    let user_config = format!("{name}/config.toml");
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config_home) => {
            config_files.push(Some(PathBuf::from(xdg_config_home).join(user_config)));
        }
        Err(_) => {
            config_files.push(home_dir().map(|path| path.join(".config").join(user_config)));
        }
    }

    config_files
}

fn build_config(name: &str, defaults: &str, defaults_format: FileFormat, config_files: Vec<Option<PathBuf>>, overrides: Config) -> Result<LoadedConfig, LoadError> {

    let builder = Config::builder()
        .add_source(config::File::from_str(defaults, defaults_format));

    let (sources_used, sources_declared): (Vec<PathBuf>, Vec<PathBuf>) = config_files.into_iter()
        .fold((Vec::new(), Vec::new()), |(mut used, mut declared), path| {
            if let Some(path) = path {
                declared.push(Clone::clone(&path));
                if path.exists() && path.is_file() {
                    used.push(path);
                }
            }
            (used, declared)
        });

    let builder = sources_used.iter()
        .cloned()
        .fold(builder, |builder, path| {
            builder.add_source(config::File::from(path).required(false))
        });

    let builder = builder.add_source(
        config::Environment::with_prefix(&name.to_uppercase())
            .separator("_")
            .try_parsing(true)
    );

    let config = builder
        .add_source(overrides)
        .build()?;

    Ok(LoadedConfig {
        config,
        config_files_used: sources_used,
        config_files_declared: sources_declared,
    })
}
