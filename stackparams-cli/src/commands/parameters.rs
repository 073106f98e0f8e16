use std::path::Path;

use tracing::debug;

use stackparams_types::resolution::{resolve, ParameterResolution, ResolutionPolicy};
use stackparams_types::template::TemplateDeclarations;
use stackparams_types::values::lookup::{ExternalValueLookup, LookupFailurePolicy};
use stackparams_types::values::{merge_values, ValueDocument, ValueMap};

/// Everything needed to produce the parameters for one stack deployment.
#[derive(Clone, Debug, Default)]
pub struct ParametersInput {
    pub template_body: String,
    pub parameters_body: Option<String>,
    /// `Key=value` tokens in command line order.
    pub overrides: Vec<String>,
    pub policy: ResolutionPolicy,
}

impl ParametersInput {

    /// Reads the template and the optional parameters file from disk.
    pub fn load(template_file: &Path, parameters_file: Option<&Path>, overrides: Vec<String>, policy: ResolutionPolicy) -> crate::Result<Self> {
        let template_body = super::read_file(template_file, "CloudFormation template")?;
        let parameters_body = parameters_file
            .map(|parameters_file| super::read_file(parameters_file, "parameters file"))
            .transpose()?;

        Ok(Self { template_body, parameters_body, overrides, policy })
    }
}

/// Renders the resolved parameters as a prettified JSON array.
pub fn render_parameters(input: &ParametersInput, lookup: &dyn ExternalValueLookup, on_failure: LookupFailurePolicy) -> crate::Result<String> {
    let resolutions = resolve_parameters(input, lookup, on_failure)?;
    let json = serde_json::to_string_pretty(&resolutions)?;
    Ok(json)
}

pub fn resolve_parameters(input: &ParametersInput, lookup: &dyn ExternalValueLookup, on_failure: LookupFailurePolicy) -> crate::Result<Vec<ParameterResolution>> {
    let file_values = match &input.parameters_body {
        Some(body) => ValueDocument::try_from_yaml_str(body)?.resolve(lookup, on_failure)?,
        None => ValueMap::new(),
    };
    let values = merge_values(file_values, &input.overrides)?;
    debug!("Using {} parameter value(s) from file and command line.", values.len());

    let declarations = TemplateDeclarations::try_from_yaml_str(&input.template_body)?;
    debug!("Template declares {} parameter(s).", declarations.len());

    let resolutions = resolve(&declarations, &values, input.policy)?;
    for resolution in &resolutions {
        match resolution {
            ParameterResolution::Explicit { name, .. } => debug!("Parameter '{name}' is set explicitly."),
            ParameterResolution::UsePrevious { name } => debug!("Parameter '{name}' keeps its previous value."),
        }
    }
    Ok(resolutions)
}
