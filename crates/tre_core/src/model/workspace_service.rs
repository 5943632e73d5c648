//! Workspace service document.

use super::resource::{Deployment, ResourceType, Status, TemplateParameters};
use serde::{Deserialize, Serialize};

/// A deployable capability attached to one workspace.
///
/// Addressable only together with its `workspace_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceService {
    pub id: String,
    pub workspace_id: String,
    /// Always `ResourceType::WorkspaceService` for documents built by this crate.
    pub resource_type: ResourceType,
    pub resource_template_name: String,
    pub resource_template_version: String,
    #[serde(default)]
    pub resource_template_parameters: TemplateParameters,
    #[serde(default)]
    pub deployment: Deployment,
}

impl WorkspaceService {
    /// Builds a not-yet-deployed service document.
    pub fn new(
        id: impl Into<String>,
        workspace_id: impl Into<String>,
        template_name: impl Into<String>,
        template_version: impl Into<String>,
        parameters: TemplateParameters,
    ) -> Self {
        Self {
            id: id.into(),
            workspace_id: workspace_id.into(),
            resource_type: ResourceType::WorkspaceService,
            resource_template_name: template_name.into(),
            resource_template_version: template_version.into(),
            resource_template_parameters: parameters,
            deployment: Deployment::new(Status::NotDeployed),
        }
    }

    pub fn is_deployed(&self) -> bool {
        self.deployment.status == Status::Deployed
    }
}
