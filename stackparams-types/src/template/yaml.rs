use serde::Deserialize;
use serde_yaml::Value;

use crate::template::*;

const PARAMETERS_SECTION: &str = "Parameters";

#[derive(Debug, Default, Deserialize)]
struct YamlParameterSpecification {
    #[serde(rename = "Default", default)]
    default: Option<Value>,
}

impl YamlParameterSpecification {
    fn has_default(&self) -> bool {
        match &self.default {
            None | Some(Value::Null) => false,
            Some(Value::String(default)) => !default.is_empty(),
            Some(_) => true,
        }
    }
}

impl TemplateDeclarations {

    /// Reads the parameter declarations from the given string of YAML template text.
    ///
    /// Only the top-level `Parameters` section is looked at. Other sections may use
    /// arbitrary tags, like the intrinsic functions `!Ref` or `!Sub`.
    ///
    /// # Example
    ///
    /// ```
    /// # use stackparams_types::template::TemplateDeclarations;
    /// # fn main() -> Result<(), stackparams_types::template::ParseTemplateError> {
    /// let yaml = r#"
    /// Parameters:
    ///   Greeting:
    ///     Type: String
    ///     Default: Hello
    ///   Recipient:
    ///     Type: String
    /// "#;
    ///
    /// let declarations = TemplateDeclarations::try_from_yaml_str(yaml)?;
    ///
    /// assert_eq!(declarations.len(), 2);
    /// assert!(declarations.contains("Recipient"));
    ///
    /// # Ok(())
    /// # }
    /// ```
    pub fn try_from_yaml_str(s: &str) -> Result<Self, ParseTemplateError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }

        let document = serde_yaml::from_str::<Value>(s)
            .map_err(|cause| ParseTemplateError::IllegalYamlTemplate { cause })?;

        let parameters = match document {
            Value::Null => return Ok(Self::default()),
            Value::Mapping(mut sections) => sections.remove(PARAMETERS_SECTION),
            _ => return Err(ParseTemplateError::IllegalTemplateStructure),
        };

        match parameters {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Mapping(parameters)) => {
                parameters.into_iter()
                    .map(|(key, specification)| parse_declaration(key, specification))
                    .collect::<Result<TemplateDeclarations, _>>()
            }
            Some(_) => Err(ParseTemplateError::IllegalParametersSection),
        }
    }
}

fn parse_declaration(key: Value, specification: Value) -> Result<ParameterDeclaration, ParseTemplateError> {
    let name = match key {
        Value::String(name) => ParameterName::from(name),
        other => return Err(ParseTemplateError::IllegalParameterName { key: format!("{other:?}") }),
    };

    let specification = match specification {
        Value::Null => YamlParameterSpecification::default(),
        Value::Mapping(_) => {
            serde_yaml::from_value::<YamlParameterSpecification>(specification)
                .map_err(|cause| ParseTemplateError::IllegalParameterSpecification { name: Clone::clone(&name), details: cause.to_string() })?
        }
        _ => {
            return Err(ParseTemplateError::IllegalParameterSpecification { name, details: String::from("Expected a mapping.") });
        }
    };

    Ok(ParameterDeclaration::new(name, specification.has_default()))
}
