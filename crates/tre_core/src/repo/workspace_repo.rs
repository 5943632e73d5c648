//! Workspace repository: read access to the parent resource of services.

use crate::model::resource::ResourceType;
use crate::model::workspace::Workspace;
use crate::repo::resource_repo::{
    active_resources_query, query_as, single, to_document, RepoError, RepoResult,
};
use crate::store::{DocumentQuery, DocumentStore};
use log::info;

pub struct WorkspaceRepository<S> {
    store: S,
}

impl<S: DocumentStore> WorkspaceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn active_workspaces_query() -> DocumentQuery {
        active_resources_query(ResourceType::Workspace)
    }

    pub fn get_active_workspaces(&self) -> RepoResult<Vec<Workspace>> {
        query_as(&self.store, &Self::active_workspaces_query())
    }

    /// # Errors
    /// - `EntityNotFound` when no live workspace has `workspace_id`.
    pub fn get_workspace_by_id(&self, workspace_id: &str) -> RepoResult<Workspace> {
        let query = Self::active_workspaces_query().eq("id", workspace_id);
        single(query_as(&self.store, &query)?)
    }

    /// # Errors
    /// - `EntityNotFound` when no live workspace has `workspace_id`.
    /// - `ResourceNotDeployed` when the workspace is not `Deployed`.
    pub fn get_deployed_workspace_by_id(&self, workspace_id: &str) -> RepoResult<Workspace> {
        let workspace = self.get_workspace_by_id(workspace_id)?;
        if !workspace.is_deployed() {
            return Err(RepoError::ResourceNotDeployed);
        }
        Ok(workspace)
    }

    /// Replaces the stored workspace document, creating it when absent.
    pub fn update_item(&self, workspace: &Workspace) -> RepoResult<()> {
        self.store.upsert_item(&to_document(workspace)?)?;
        info!(
            "event=workspace_update module=repo status=ok workspace_id={} deployment_status={}",
            workspace.id, workspace.deployment.status
        );
        Ok(())
    }
}
