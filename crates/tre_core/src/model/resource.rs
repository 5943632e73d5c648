//! Fields shared by every deployable resource.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Template parameter bag, persisted as `resourceTemplateParameters`.
pub type TemplateParameters = Map<String, Value>;

/// Kind tag stored in every resource document's `resourceType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[serde(rename = "workspace")]
    Workspace,
    #[serde(rename = "workspace-service")]
    WorkspaceService,
    #[serde(rename = "user-resource")]
    UserResource,
}

impl ResourceType {
    /// Stable wire value, as used in document filters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::WorkspaceService => "workspace-service",
            Self::UserResource => "user-resource",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a resource's underlying infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    NotDeployed,
    Deploying,
    Deployed,
    Deleting,
    /// Soft-delete marker; documents in this state are invisible to queries.
    Deleted,
    DeploymentFailed,
    DeletingFailed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotDeployed => "not_deployed",
            Self::Deploying => "deploying",
            Self::Deployed => "deployed",
            Self::Deleting => "deleting",
            Self::Deleted => "deleted",
            Self::DeploymentFailed => "deployment_failed",
            Self::DeletingFailed => "deleting_failed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment sub-record of a resource document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    pub status: Status,
    #[serde(default)]
    pub message: String,
}

impl Deployment {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            message: String::new(),
        }
    }
}

impl Default for Deployment {
    fn default() -> Self {
        Self::new(Status::NotDeployed)
    }
}
