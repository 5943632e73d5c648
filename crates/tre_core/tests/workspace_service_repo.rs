use serde_json::{json, Value};
use std::cell::RefCell;
use tre_core::{
    Deployment, DocumentQuery, DocumentStore, RepoError, ResolvedTemplate, ResourceType, Status,
    StoreResult, TemplateParameters, TemplateValidationError, TemplateValidator, WorkspaceService,
    WorkspaceServiceInCreate, WorkspaceServicePatchEnabled, WorkspaceServiceRepository,
};

const WORKSPACE_ID: &str = "abc000d3-82da-4bfc-b6e9-9a7853ef753e";
const SERVICE_ID: &str = "000000d3-82da-4bfc-b6e9-9a7853ef753e";
const TRE_ID: &str = "9876";

/// Store double that returns canned documents and records every call.
#[derive(Default)]
struct RecordingStore {
    documents: Vec<Value>,
    queries: RefCell<Vec<DocumentQuery>>,
    created: RefCell<Vec<Value>>,
    upserted: RefCell<Vec<Value>>,
}

impl RecordingStore {
    fn returning(documents: Vec<Value>) -> Self {
        Self {
            documents,
            ..Self::default()
        }
    }
}

impl DocumentStore for RecordingStore {
    fn query(&self, query: &DocumentQuery) -> StoreResult<Vec<Value>> {
        self.queries.borrow_mut().push(query.clone());
        Ok(self.documents.clone())
    }

    fn create_item(&self, document: &Value) -> StoreResult<()> {
        self.created.borrow_mut().push(document.clone());
        Ok(())
    }

    fn upsert_item(&self, document: &Value) -> StoreResult<()> {
        self.upserted.borrow_mut().push(document.clone());
        Ok(())
    }
}

enum StubValidator {
    Accept,
    RejectMissing(&'static str),
}

impl TemplateValidator for StubValidator {
    fn validate_input_against_template(
        &self,
        template_name: &str,
        resource_type: ResourceType,
        _properties: &TemplateParameters,
    ) -> Result<ResolvedTemplate, TemplateValidationError> {
        assert_eq!(resource_type, ResourceType::WorkspaceService);
        match self {
            Self::Accept => Ok(ResolvedTemplate {
                name: template_name.to_string(),
                version: "0.1.0".to_string(),
            }),
            Self::RejectMissing(property) => Err(
                TemplateValidationError::MissingRequiredProperty(property.to_string()),
            ),
        }
    }
}

fn repo(
    store: &RecordingStore,
    validator: StubValidator,
) -> WorkspaceServiceRepository<&RecordingStore, StubValidator> {
    WorkspaceServiceRepository::new(store, validator, TRE_ID)
}

fn workspace_service(status: Status) -> WorkspaceService {
    let mut service = WorkspaceService::new(
        SERVICE_ID,
        WORKSPACE_ID,
        "my-workspace-service",
        "0.1.0",
        TemplateParameters::new(),
    );
    service.deployment = Deployment::new(status);
    service
}

fn basic_request() -> WorkspaceServiceInCreate {
    serde_json::from_value(json!({
        "workspaceServiceType": "workspace-service-type",
        "properties": {"display_name": "test", "description": "test", "tre_id": "test"}
    }))
    .unwrap()
}

#[test]
fn get_active_workspace_services_for_workspace_queries_db() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::Accept);

    let services = repo
        .get_active_workspace_services_for_workspace(WORKSPACE_ID)
        .unwrap();

    assert!(services.is_empty());
    let queries = store.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(
        queries[0],
        WorkspaceServiceRepository::<&RecordingStore, StubValidator>::active_workspace_services_query(
            WORKSPACE_ID
        )
    );
    assert_eq!(
        queries[0].to_string(),
        format!(
            "SELECT * FROM c WHERE c.resourceType = \"workspace-service\" AND c.deployment.status != \"deleted\" AND c.workspaceId = \"{WORKSPACE_ID}\""
        )
    );
}

#[test]
fn get_workspace_service_by_id_queries_db() {
    let document = serde_json::to_value(workspace_service(Status::Deployed)).unwrap();
    let store = RecordingStore::returning(vec![document]);
    let repo = repo(&store, StubValidator::Accept);

    repo.get_workspace_service_by_id(WORKSPACE_ID, SERVICE_ID)
        .unwrap();

    let expected = format!(
        "SELECT * FROM c WHERE c.resourceType = \"workspace-service\" AND c.deployment.status != \"deleted\" AND c.workspaceId = \"{WORKSPACE_ID}\" AND c.id = \"{SERVICE_ID}\""
    );
    let queries = store.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].to_string(), expected);
}

#[test]
fn get_workspace_service_by_id_returns_entity_not_found_if_no_available_services() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::Accept);

    let err = repo
        .get_workspace_service_by_id(WORKSPACE_ID, SERVICE_ID)
        .unwrap_err();
    assert!(matches!(err, RepoError::EntityNotFound));
}

#[test]
fn get_deployed_workspace_service_by_id_returns_not_deployed_if_not_deployed() {
    let document = serde_json::to_value(workspace_service(Status::NotDeployed)).unwrap();
    let store = RecordingStore::returning(vec![document]);
    let repo = repo(&store, StubValidator::Accept);

    let err = repo
        .get_deployed_workspace_service_by_id(WORKSPACE_ID, SERVICE_ID)
        .unwrap_err();
    assert!(matches!(err, RepoError::ResourceNotDeployed));
}

#[test]
fn get_deployed_workspace_service_by_id_returns_workspace_service_if_deployed() {
    let service = workspace_service(Status::Deployed);
    let store = RecordingStore::returning(vec![serde_json::to_value(&service).unwrap()]);
    let repo = repo(&store, StubValidator::Accept);

    let actual = repo
        .get_deployed_workspace_service_by_id(WORKSPACE_ID, SERVICE_ID)
        .unwrap();
    assert_eq!(actual, service);
}

#[test]
fn undecodable_document_is_invalid_data() {
    let store = RecordingStore::returning(vec![json!({"id": SERVICE_ID})]);
    let repo = repo(&store, StubValidator::Accept);

    let err = repo
        .get_workspace_service_by_id(WORKSPACE_ID, SERVICE_ID)
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn create_workspace_service_item_creates_a_workspace_service_with_the_right_values() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::Accept);
    let request = basic_request();

    let service = repo
        .create_workspace_service_item(&request, WORKSPACE_ID)
        .unwrap();

    assert_eq!(service.resource_template_name, request.workspace_service_type);
    assert_eq!(service.resource_template_version, "0.1.0");
    assert_eq!(service.resource_type, ResourceType::WorkspaceService);
    assert_eq!(service.deployment.status, Status::NotDeployed);
    assert_eq!(service.workspace_id, WORKSPACE_ID);
    assert!(uuid::Uuid::parse_str(&service.id).is_ok());
    // caller-supplied tre_id must not override the system parameter
    assert_eq!(service.resource_template_parameters["tre_id"], json!(TRE_ID));
    assert_eq!(service.resource_template_parameters["display_name"], json!("test"));

    assert!(store.created.borrow().is_empty());
    assert!(store.upserted.borrow().is_empty());
}

#[test]
fn create_workspace_service_item_propagates_validation_error() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::RejectMissing("display_name"));

    let err = repo
        .create_workspace_service_item(&basic_request(), WORKSPACE_ID)
        .unwrap_err();

    assert!(matches!(
        err,
        RepoError::Validation(TemplateValidationError::MissingRequiredProperty(ref name))
            if name == "display_name"
    ));
    assert!(store.queries.borrow().is_empty());
    assert!(store.created.borrow().is_empty());
}

#[test]
fn patch_workspace_service_updates_item() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::Accept);
    let mut service = workspace_service(Status::Deployed);

    repo.patch_workspace_service(&mut service, &WorkspaceServicePatchEnabled { enabled: true })
        .unwrap();

    assert_eq!(service.resource_template_parameters["enabled"], json!(true));
    let upserted = store.upserted.borrow();
    assert_eq!(upserted.len(), 1);
    assert_eq!(upserted[0], serde_json::to_value(&service).unwrap());
    assert!(store.queries.borrow().is_empty());
}

#[test]
fn patch_workspace_service_does_not_revalidate_parameters() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::RejectMissing("display_name"));
    let mut service = workspace_service(Status::Deployed);

    repo.patch_workspace_service(&mut service, &WorkspaceServicePatchEnabled { enabled: false })
        .unwrap();

    assert_eq!(service.resource_template_parameters["enabled"], json!(false));
    assert_eq!(store.upserted.borrow().len(), 1);
    assert!(store.created.borrow().is_empty());
}

#[test]
fn save_item_writes_one_new_document() {
    let store = RecordingStore::default();
    let repo = repo(&store, StubValidator::Accept);
    let service = repo
        .create_workspace_service_item(&basic_request(), WORKSPACE_ID)
        .unwrap();

    repo.save_item(&service).unwrap();

    let created = store.created.borrow();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["resourceType"], json!("workspace-service"));
    assert_eq!(created[0]["deployment"]["status"], json!("not_deployed"));
    assert_eq!(created[0]["workspaceId"], json!(WORKSPACE_ID));
}
