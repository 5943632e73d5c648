use serde_json::Map;
use tre_core::db::open_db_in_memory;
use tre_core::{
    Deployment, RepoError, SqliteDocumentStore, Status, Workspace, WorkspaceRepository,
    RESOURCES_CONTAINER,
};

fn workspace(id: &str, status: Status) -> Workspace {
    let mut workspace = Workspace::new(id, "tre-workspace-base", "0.1.0", Map::new());
    workspace.deployment = Deployment::new(status);
    workspace
}

#[test]
fn active_workspaces_exclude_deleted() {
    let conn = open_db_in_memory().unwrap();
    let repo = WorkspaceRepository::new(
        SqliteDocumentStore::try_new(&conn, RESOURCES_CONTAINER).unwrap(),
    );
    repo.update_item(&workspace("ws-live", Status::Deployed))
        .unwrap();
    repo.update_item(&workspace("ws-gone", Status::Deleted))
        .unwrap();

    let active = repo.get_active_workspaces().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "ws-live");
}

#[test]
fn active_workspaces_query_is_scoped_to_workspace_type() {
    assert_eq!(
        WorkspaceRepository::<SqliteDocumentStore>::active_workspaces_query().to_string(),
        "SELECT * FROM c WHERE c.resourceType = \"workspace\" AND c.deployment.status != \"deleted\""
    );
}

#[test]
fn get_deployed_workspace_checks_status() {
    let conn = open_db_in_memory().unwrap();
    let repo = WorkspaceRepository::new(
        SqliteDocumentStore::try_new(&conn, RESOURCES_CONTAINER).unwrap(),
    );
    repo.update_item(&workspace("ws-1", Status::DeploymentFailed))
        .unwrap();

    let found = repo.get_workspace_by_id("ws-1").unwrap();
    assert_eq!(found.deployment.status, Status::DeploymentFailed);
    assert!(matches!(
        repo.get_deployed_workspace_by_id("ws-1"),
        Err(RepoError::ResourceNotDeployed)
    ));
    assert!(matches!(
        repo.get_workspace_by_id("ws-missing"),
        Err(RepoError::EntityNotFound)
    ));
}

#[test]
fn status_round_trips_through_snake_case_wire_values() {
    let document = serde_json::to_value(workspace("ws-1", Status::DeletingFailed)).unwrap();
    assert_eq!(document["deployment"]["status"], "deleting_failed");
    assert_eq!(document["resourceType"], "workspace");
}
