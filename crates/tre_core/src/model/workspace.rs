//! Workspace document, the parent boundary of workspace services.

use super::resource::{Deployment, ResourceType, Status, TemplateParameters};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub resource_type: ResourceType,
    pub resource_template_name: String,
    pub resource_template_version: String,
    #[serde(default)]
    pub resource_template_parameters: TemplateParameters,
    #[serde(default)]
    pub deployment: Deployment,
}

impl Workspace {
    pub fn new(
        id: impl Into<String>,
        template_name: impl Into<String>,
        template_version: impl Into<String>,
        parameters: TemplateParameters,
    ) -> Self {
        Self {
            id: id.into(),
            resource_type: ResourceType::Workspace,
            resource_template_name: template_name.into(),
            resource_template_version: template_version.into(),
            resource_template_parameters: parameters,
            deployment: Deployment::default(),
        }
    }

    pub fn is_deployed(&self) -> bool {
        self.deployment.status == Status::Deployed
    }
}
