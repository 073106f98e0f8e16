use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::template::{ParameterDeclaration, ParameterName, TemplateDeclarations};
use crate::values::ValueMap;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ResolutionPolicy {
    /// Leave out parameters with a default in the template, unless a value is given.
    pub accept_defaults: bool,
    /// Never instruct to reuse the previously deployed value.
    pub no_previous: bool,
}

/// The instruction passed on for one declared parameter.
///
/// Parameters which fall back to their template default have no resolution at all.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum ParameterResolution {
    Explicit { name: ParameterName, value: String },
    UsePrevious { name: ParameterName },
}

impl ParameterResolution {
    pub fn name(&self) -> &ParameterName {
        match self {
            ParameterResolution::Explicit { name, .. } => name,
            ParameterResolution::UsePrevious { name } => name,
        }
    }
}

impl Serialize for ParameterResolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("ParameterResolution", 2)?;
        match self {
            ParameterResolution::Explicit { name, value } => {
                record.serialize_field("ParameterKey", name)?;
                record.serialize_field("ParameterValue", value)?;
            }
            ParameterResolution::UsePrevious { name } => {
                record.serialize_field("ParameterKey", name)?;
                record.serialize_field("UsePreviousValue", &true)?;
            }
        }
        record.end()
    }
}

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum ResolveError {
    #[error("specified parameters not in template: {}", Names(names.as_slice()))]
    UnknownParameters { names: Vec<String> },
    #[error("missing parameters: {}", Names(names.as_slice()))]
    MissingRequiredParameters { names: Vec<ParameterName> },
}

struct Names<'a, T>(&'a [T]);

impl<T: fmt::Display> fmt::Display for Names<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

enum Decision {
    Emit(ParameterResolution),
    Omit,
    Missing(ParameterName),
}

/// Decides for every declared parameter, whether to pass an explicit value,
/// reuse the previously deployed value or leave it to the template default.
///
/// Fails without any resolutions, if a value is given for an undeclared parameter
/// or if a required parameter cannot be resolved. All offending names are reported.
pub fn resolve(declarations: &TemplateDeclarations, values: &ValueMap, policy: ResolutionPolicy) -> Result<Vec<ParameterResolution>, ResolveError> {
    let unknown = values.keys()
        .filter(|name| !declarations.contains(name))
        .cloned()
        .collect::<Vec<_>>();
    if !unknown.is_empty() {
        return Err(ResolveError::UnknownParameters { names: unknown });
    }

    let mut resolutions = Vec::new();
    let mut missing = Vec::new();
    for declaration in declarations {
        match decide(declaration, values, policy) {
            Decision::Emit(resolution) => resolutions.push(resolution),
            Decision::Omit => {}
            Decision::Missing(name) => missing.push(name),
        }
    }

    if !missing.is_empty() {
        return Err(ResolveError::MissingRequiredParameters { names: missing });
    }
    Ok(resolutions)
}

fn decide(declaration: &ParameterDeclaration, values: &ValueMap, policy: ResolutionPolicy) -> Decision {
    let name = &declaration.name;
    if let Some(value) = values.get(name.value()) {
        Decision::Emit(ParameterResolution::Explicit { name: Clone::clone(name), value: Clone::clone(value) })
    } else if policy.accept_defaults && declaration.has_default {
        Decision::Omit
    } else if !policy.no_previous {
        Decision::Emit(ParameterResolution::UsePrevious { name: Clone::clone(name) })
    } else {
        Decision::Missing(Clone::clone(name))
    }
}
