//! Workspace service use-cases.
//!
//! # Invariants
//! - Services are only created inside a deployed workspace.
//! - Service APIs never bypass repository validation or write contracts.

use crate::model::schemas::{WorkspaceServiceInCreate, WorkspaceServicePatchEnabled};
use crate::model::workspace_service::WorkspaceService;
use crate::repo::resource_repo::RepoResult;
use crate::repo::workspace_repo::WorkspaceRepository;
use crate::repo::workspace_service_repo::WorkspaceServiceRepository;
use crate::store::DocumentStore;
use crate::template::TemplateValidator;
use log::info;

pub struct WorkspaceServiceOps<S, V> {
    workspaces: WorkspaceRepository<S>,
    services: WorkspaceServiceRepository<S, V>,
}

impl<S, V> WorkspaceServiceOps<S, V>
where
    S: DocumentStore + Clone,
    V: TemplateValidator,
{
    /// Both repositories share `store`; `tre_id` is forwarded to service creation.
    pub fn new(store: S, validator: V, tre_id: impl Into<String>) -> Self {
        Self {
            workspaces: WorkspaceRepository::new(store.clone()),
            services: WorkspaceServiceRepository::new(store, validator, tre_id),
        }
    }

    pub fn list_workspace_services(&self, workspace_id: &str) -> RepoResult<Vec<WorkspaceService>> {
        self.services
            .get_active_workspace_services_for_workspace(workspace_id)
    }

    pub fn get_workspace_service(
        &self,
        workspace_id: &str,
        service_id: &str,
    ) -> RepoResult<WorkspaceService> {
        self.services
            .get_workspace_service_by_id(workspace_id, service_id)
    }

    /// Creates and saves a service in `workspace_id`.
    ///
    /// # Errors
    /// - `EntityNotFound` / `ResourceNotDeployed` for the parent workspace.
    /// - Validation errors from the template validator, unchanged.
    pub fn create_workspace_service(
        &self,
        workspace_id: &str,
        request: &WorkspaceServiceInCreate,
    ) -> RepoResult<WorkspaceService> {
        self.workspaces.get_deployed_workspace_by_id(workspace_id)?;
        let service = self
            .services
            .create_workspace_service_item(request, workspace_id)?;
        self.services.save_item(&service)?;

        info!(
            "event=workspace_service_create module=service status=ok workspace_id={workspace_id} service_id={}",
            service.id
        );
        Ok(service)
    }

    /// Loads a live service and writes it back with `enabled` set.
    pub fn set_workspace_service_enabled(
        &self,
        workspace_id: &str,
        service_id: &str,
        enabled: bool,
    ) -> RepoResult<WorkspaceService> {
        let mut service = self
            .services
            .get_workspace_service_by_id(workspace_id, service_id)?;
        self.services
            .patch_workspace_service(&mut service, &WorkspaceServicePatchEnabled { enabled })?;
        Ok(service)
    }
}
