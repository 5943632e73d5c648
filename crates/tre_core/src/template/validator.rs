//! Template validator contract and its error type.

use crate::model::resource::{ResourceType, TemplateParameters};
use crate::model::template::PropertyType;
use crate::repo::resource_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Template a create request was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub name: String,
    pub version: String,
}

/// Reasons a create request does not satisfy its template.
#[derive(Debug)]
pub enum TemplateValidationError {
    /// No current template exists for the name and resource type.
    TemplateNotFound {
        name: String,
        resource_type: ResourceType,
    },
    MissingRequiredProperty(String),
    InvalidPropertyType {
        property: String,
        expected: PropertyType,
    },
    /// Value is outside the property's `enum` list.
    ValueNotAllowed(String),
    /// Template lookup itself failed.
    Lookup(Box<RepoError>),
}

impl Display for TemplateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound {
                name,
                resource_type,
            } => write!(f, "the template `{name}` does not exist for {resource_type}"),
            Self::MissingRequiredProperty(property) => {
                write!(f, "required property `{property}` is missing")
            }
            Self::InvalidPropertyType { property, expected } => write!(
                f,
                "property `{property}` must be of type {}",
                expected.as_str()
            ),
            Self::ValueNotAllowed(property) => {
                write!(f, "property `{property}` has a value outside its allowed set")
            }
            Self::Lookup(err) => write!(f, "template lookup failed: {err}"),
        }
    }
}

impl Error for TemplateValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lookup(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// Validates requested parameters against a named template.
pub trait TemplateValidator {
    fn validate_input_against_template(
        &self,
        template_name: &str,
        resource_type: ResourceType,
        properties: &TemplateParameters,
    ) -> Result<ResolvedTemplate, TemplateValidationError>;
}

impl<V: TemplateValidator + ?Sized> TemplateValidator for &V {
    fn validate_input_against_template(
        &self,
        template_name: &str,
        resource_type: ResourceType,
        properties: &TemplateParameters,
    ) -> Result<ResolvedTemplate, TemplateValidationError> {
        (**self).validate_input_against_template(template_name, resource_type, properties)
    }
}
