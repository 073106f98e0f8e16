mod yaml;

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterName(String);

impl ParameterName {
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ParameterName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ParameterName {
    fn from(value: &str) -> Self {
        Self(String::from(value))
    }
}

impl Borrow<str> for ParameterName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A parameter as declared in the `Parameters` section of a template.
///
/// `has_default` is only true for a declared default which is present and not the empty string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParameterDeclaration {
    pub name: ParameterName,
    pub has_default: bool,
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<ParameterName>, has_default: bool) -> Self {
        Self { name: name.into(), has_default }
    }
}

/// All parameters declared by one template, in the order the template lists them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TemplateDeclarations {
    declarations: Vec<ParameterDeclaration>,
}

impl TemplateDeclarations {
    pub fn new(declarations: Vec<ParameterDeclaration>) -> Self {
        Self { declarations }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.declarations.iter()
            .any(|declaration| declaration.name.value() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item=&ParameterDeclaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl FromIterator<ParameterDeclaration> for TemplateDeclarations {
    fn from_iter<T: IntoIterator<Item=ParameterDeclaration>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TemplateDeclarations {
    type Item = &'a ParameterDeclaration;
    type IntoIter = std::slice::Iter<'a, ParameterDeclaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.declarations.iter()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseTemplateError {
    #[error("Failed to parse template, due to: {cause}")]
    IllegalYamlTemplate { cause: serde_yaml::Error },
    #[error("Template must be a YAML mapping at the top level!")]
    IllegalTemplateStructure,
    #[error("The 'Parameters' section of the template must be a mapping!")]
    IllegalParametersSection,
    #[error("Parameter name '{key}' is not a string!")]
    IllegalParameterName { key: String },
    #[error("Declaration of parameter '{name}' is not valid: {details}")]
    IllegalParameterSpecification { name: ParameterName, details: String },
}
