//! Workspace service repository.
//!
//! # Responsibility
//! - Query workspace services scoped to their owning workspace.
//! - Build new service documents from validated create requests.
//! - Apply enable/disable patches with a single write.
//!
//! # Invariants
//! - Every read filters on `workspaceId`, the `workspace-service` type tag and
//!   a non-deleted deployment status.
//! - System parameters always override caller parameters with the same key.
//! - New services start as `NotDeployed`; creation does not write.

use crate::model::resource::{ResourceType, TemplateParameters};
use crate::model::schemas::{WorkspaceServiceInCreate, WorkspaceServicePatchEnabled};
use crate::model::workspace_service::WorkspaceService;
use crate::repo::resource_repo::{
    active_resources_query, query_as, single, to_document, RepoError, RepoResult,
};
use crate::store::{DocumentQuery, DocumentStore};
use crate::template::TemplateValidator;
use log::info;
use serde_json::Value;
use uuid::Uuid;

/// Template parameter key carrying the TRE deployment id.
pub const TRE_ID_PARAMETER: &str = "tre_id";
/// Template parameter key toggled by enable/disable patches.
pub const ENABLED_PARAMETER: &str = "enabled";

pub struct WorkspaceServiceRepository<S, V> {
    store: S,
    validator: V,
    tre_id: String,
}

impl<S: DocumentStore, V: TemplateValidator> WorkspaceServiceRepository<S, V> {
    /// `tre_id` is injected into every new service's template parameters.
    pub fn new(store: S, validator: V, tre_id: impl Into<String>) -> Self {
        Self {
            store,
            validator,
            tre_id: tre_id.into(),
        }
    }

    /// Filter selecting live services of one workspace.
    pub fn active_workspace_services_query(workspace_id: &str) -> DocumentQuery {
        active_resources_query(ResourceType::WorkspaceService).eq("workspaceId", workspace_id)
    }

    /// Lists live services of `workspace_id`. Order is unspecified.
    pub fn get_active_workspace_services_for_workspace(
        &self,
        workspace_id: &str,
    ) -> RepoResult<Vec<WorkspaceService>> {
        query_as(
            &self.store,
            &Self::active_workspace_services_query(workspace_id),
        )
    }

    /// Returns the live service `service_id` of `workspace_id`.
    ///
    /// # Errors
    /// - `EntityNotFound` when no live service matches.
    pub fn get_workspace_service_by_id(
        &self,
        workspace_id: &str,
        service_id: &str,
    ) -> RepoResult<WorkspaceService> {
        let query = Self::active_workspace_services_query(workspace_id).eq("id", service_id);
        single(query_as(&self.store, &query)?)
    }

    /// Like [`Self::get_workspace_service_by_id`], restricted to deployed services.
    ///
    /// # Errors
    /// - `EntityNotFound` when no live service matches.
    /// - `ResourceNotDeployed` when the service status is not `Deployed`.
    pub fn get_deployed_workspace_service_by_id(
        &self,
        workspace_id: &str,
        service_id: &str,
    ) -> RepoResult<WorkspaceService> {
        let service = self.get_workspace_service_by_id(workspace_id, service_id)?;
        if !service.is_deployed() {
            return Err(RepoError::ResourceNotDeployed);
        }
        Ok(service)
    }

    /// Validates `request` and builds an unsaved `NotDeployed` service.
    ///
    /// Validator failures are returned unchanged as `RepoError::Validation`.
    /// Call [`Self::save_item`] to persist the result.
    pub fn create_workspace_service_item(
        &self,
        request: &WorkspaceServiceInCreate,
        workspace_id: &str,
    ) -> RepoResult<WorkspaceService> {
        let template = self.validator.validate_input_against_template(
            &request.workspace_service_type,
            ResourceType::WorkspaceService,
            &request.properties,
        )?;

        let mut parameters = request.properties.clone();
        parameters.extend(self.system_parameters());

        Ok(WorkspaceService::new(
            Uuid::new_v4().to_string(),
            workspace_id,
            template.name,
            template.version,
            parameters,
        ))
    }

    /// Writes a new service document. Fails on an existing id.
    pub fn save_item(&self, service: &WorkspaceService) -> RepoResult<()> {
        self.store.create_item(&to_document(service)?)?;
        info!(
            "event=workspace_service_save module=repo status=ok workspace_id={} service_id={} template={}",
            service.workspace_id, service.id, service.resource_template_name
        );
        Ok(())
    }

    /// Replaces the stored document with `service`.
    pub fn update_item(&self, service: &WorkspaceService) -> RepoResult<()> {
        self.store.upsert_item(&to_document(service)?)?;
        info!(
            "event=workspace_service_update module=repo status=ok workspace_id={} service_id={}",
            service.workspace_id, service.id
        );
        Ok(())
    }

    /// Sets the `enabled` parameter on `service` and writes it once.
    ///
    /// The template is not re-validated.
    pub fn patch_workspace_service(
        &self,
        service: &mut WorkspaceService,
        patch: &WorkspaceServicePatchEnabled,
    ) -> RepoResult<()> {
        service
            .resource_template_parameters
            .insert(ENABLED_PARAMETER.to_string(), Value::Bool(patch.enabled));
        self.update_item(service)
    }

    fn system_parameters(&self) -> TemplateParameters {
        let mut parameters = TemplateParameters::new();
        parameters.insert(
            TRE_ID_PARAMETER.to_string(),
            Value::String(self.tre_id.clone()),
        );
        parameters
    }
}
