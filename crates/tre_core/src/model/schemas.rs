//! Request models accepted by repository write paths.

use super::resource::TemplateParameters;
use serde::{Deserialize, Serialize};

/// Request to create a workspace service from a named template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceServiceInCreate {
    /// Template name the service is built from.
    pub workspace_service_type: String,
    /// Caller-supplied template parameters. System parameters win on key clashes.
    #[serde(default)]
    pub properties: TemplateParameters,
}

/// Patch toggling a workspace service on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceServicePatchEnabled {
    pub enabled: bool,
}
