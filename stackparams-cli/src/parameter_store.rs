use std::process::Command;

use tracing::{debug, info};

use stackparams_types::values::lookup::{ExternalValueLookup, LookupError};

use crate::settings::AwsSettings;

/// Looks up values in the AWS SSM Parameter Store via the `aws` command line tool.
///
/// Values are decrypted, so `SecureString` parameters can be used for secrets.
pub struct ParameterStoreLookup {
    settings: AwsSettings,
}

impl ParameterStoreLookup {
    pub fn new(settings: AwsSettings) -> Self {
        Self { settings }
    }

    fn command(&self, name: &str) -> Command {
        let mut command = Command::new(&self.settings.command);
        command.args(["ssm", "get-parameter", "--name", name, "--with-decryption", "--query", "Parameter.Value", "--output", "text"]);

        if let Some(region) = &self.settings.region {
            command.arg("--region").arg(region);
        }
        if let Some(profile) = &self.settings.profile {
            command.arg("--profile").arg(profile);
        }
        command
    }
}

impl ExternalValueLookup for ParameterStoreLookup {
    fn lookup(&self, name: &str) -> Result<String, LookupError> {
        info!("ParameterStore: GetParameter({name:?})");

        let mut command = self.command(name);
        debug!("Running {command:?}");

        let output = command.output()
            .map_err(|cause| LookupError::Failed {
                name: String::from(name),
                details: format!("Could not run '{}': {cause}", self.settings.command),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return if stderr.contains("ParameterNotFound") {
                Err(LookupError::NotFound { name: String::from(name) })
            } else {
                Err(LookupError::Failed { name: String::from(name), details: String::from(stderr.trim()) })
            };
        }

        let value = String::from_utf8(output.stdout)
            .map_err(|cause| LookupError::Failed { name: String::from(name), details: cause.to_string() })?;

        let value = value.strip_suffix('\n').unwrap_or(&value);
        let value = value.strip_suffix('\r').unwrap_or(value);
        Ok(String::from(value))
    }
}
