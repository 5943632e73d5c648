//! Validator backed by resource template documents.
//!
//! Checks, in order: the current template exists, every `required` property is
//! present, and each supplied property declared by the template has the
//! declared JSON type and (when set) one of the `enum` values. Properties the
//! template does not declare are accepted as-is.

use super::validator::{ResolvedTemplate, TemplateValidationError, TemplateValidator};
use crate::model::resource::{ResourceType, TemplateParameters};
use crate::model::template::ResourceTemplate;
use crate::repo::resource_repo::RepoError;
use crate::repo::template_repo::ResourceTemplateRepository;
use crate::store::DocumentStore;
use log::debug;

pub struct SchemaTemplateValidator<S> {
    templates: ResourceTemplateRepository<S>,
}

impl<S: DocumentStore> SchemaTemplateValidator<S> {
    pub fn new(templates: ResourceTemplateRepository<S>) -> Self {
        Self { templates }
    }
}

impl<S: DocumentStore> TemplateValidator for SchemaTemplateValidator<S> {
    fn validate_input_against_template(
        &self,
        template_name: &str,
        resource_type: ResourceType,
        properties: &TemplateParameters,
    ) -> Result<ResolvedTemplate, TemplateValidationError> {
        let template = match self
            .templates
            .get_current_template(template_name, resource_type)
        {
            Ok(template) => template,
            Err(RepoError::EntityNotFound) => {
                return Err(TemplateValidationError::TemplateNotFound {
                    name: template_name.to_string(),
                    resource_type,
                });
            }
            Err(err) => return Err(TemplateValidationError::Lookup(Box::new(err))),
        };

        validate_properties(&template, properties)?;
        debug!(
            "event=template_validate module=template status=ok template={} version={}",
            template.name, template.version
        );

        Ok(ResolvedTemplate {
            name: template.name,
            version: template.version,
        })
    }
}

fn validate_properties(
    template: &ResourceTemplate,
    properties: &TemplateParameters,
) -> Result<(), TemplateValidationError> {
    if let Some(missing) = template
        .required
        .iter()
        .find(|name| !properties.contains_key(name.as_str()))
    {
        return Err(TemplateValidationError::MissingRequiredProperty(
            missing.clone(),
        ));
    }

    for (name, value) in properties {
        let Some(schema) = template.properties.get(name) else {
            continue;
        };
        if !schema.kind.accepts(value) {
            return Err(TemplateValidationError::InvalidPropertyType {
                property: name.clone(),
                expected: schema.kind,
            });
        }
        if let Some(allowed) = &schema.allowed {
            if !allowed.contains(value) {
                return Err(TemplateValidationError::ValueNotAllowed(name.clone()));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_properties;
    use crate::model::resource::ResourceType;
    use crate::model::template::{PropertyType, ResourceTemplate, TemplateProperty};
    use crate::template::TemplateValidationError;
    use serde_json::{json, Map, Value};
    use std::collections::BTreeMap;

    fn template() -> ResourceTemplate {
        let mut properties = BTreeMap::new();
        properties.insert(
            "display_name".to_string(),
            TemplateProperty::of(PropertyType::String),
        );
        properties.insert(
            "disk_gb".to_string(),
            TemplateProperty::of(PropertyType::Integer),
        );
        properties.insert(
            "vm_size".to_string(),
            TemplateProperty {
                allowed: Some(vec![json!("small"), json!("large")]),
                ..TemplateProperty::of(PropertyType::String)
            },
        );
        ResourceTemplate {
            id: "template-1".to_string(),
            name: "tre-service-guacamole".to_string(),
            version: "0.1.0".to_string(),
            description: String::new(),
            resource_type: ResourceType::WorkspaceService,
            current: true,
            required: vec!["display_name".to_string()],
            properties,
        }
    }

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn undeclared_properties_are_accepted() {
        let result = validate_properties(
            &template(),
            &props(json!({"display_name": "svc", "extra": 42})),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn required_property_is_checked_before_types() {
        let err = validate_properties(&template(), &props(json!({"vm_size": 1}))).unwrap_err();
        assert!(matches!(
            err,
            TemplateValidationError::MissingRequiredProperty(name) if name == "display_name"
        ));
    }

    #[test]
    fn enum_rejects_unknown_value() {
        let err = validate_properties(
            &template(),
            &props(json!({"display_name": "svc", "vm_size": "huge"})),
        )
        .unwrap_err();
        assert!(matches!(err, TemplateValidationError::ValueNotAllowed(name) if name == "vm_size"));
    }

    #[test]
    fn integer_accepts_whole_floats_only() {
        let whole = validate_properties(
            &template(),
            &props(json!({"display_name": "svc", "disk_gb": 128.0})),
        );
        assert!(whole.is_ok());

        let err = validate_properties(
            &template(),
            &props(json!({"display_name": "svc", "disk_gb": 1.5})),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TemplateValidationError::InvalidPropertyType { ref property, .. } if property == "disk_gb"
        ));
    }
}
