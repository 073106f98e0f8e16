use std::path::PathBuf;

use stackparams_types::values::lookup::LookupFailurePolicy;
use stackparams_util::logging::LoggingConfig;
use stackparams_util::settings::{load_config, Config, FileFormat, LoadError, LoadedConfig};

pub const NAME: &str = "stackparams";

#[derive(Clone, Debug)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub logging: LoggingConfig,
    pub loaded: LoadedConfig,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LookupSettings {
    pub failure: LookupFailurePolicy,
    pub aws: AwsSettings,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AwsSettings {
    pub command: String,
    pub region: Option<String>,
    pub profile: Option<String>,
}

pub fn load() -> Result<Settings, LoadError> {
    load_with_overrides(Config::default())
}

pub fn load_with_overrides(overrides: Config) -> Result<Settings, LoadError> {
    let loaded = load_config(NAME, include_str!("../stackparams.toml"), FileFormat::Toml, overrides)?;

    let lookup = LookupSettings {
        failure: loaded.get_parsed::<LookupFailurePolicy>("lookup.failure")?,
        aws: AwsSettings {
            command: loaded.get_string("lookup.aws.command")?,
            region: loaded.get_optional_string("lookup.aws.region")?,
            profile: loaded.get_optional_string("lookup.aws.profile")?,
        },
    };

    let logging = LoggingConfig {
        file_logging: loaded.get_optional_string("logging.file")?.map(PathBuf::from),
    };

    Ok(Settings { lookup, logging, loaded })
}
