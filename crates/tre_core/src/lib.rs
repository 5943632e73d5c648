//! Resource repositories for Trusted Research Environment workspaces.
//!
//! Workspaces and the services deployed into them are stored as JSON
//! documents. This crate owns the document filters, the template validation
//! seam and the deployment-state checks applied on every lookup.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod template;

pub use config::{ConfigError, TreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::resource::{Deployment, ResourceType, Status, TemplateParameters};
pub use model::schemas::{WorkspaceServiceInCreate, WorkspaceServicePatchEnabled};
pub use model::template::{PropertyType, ResourceTemplate, TemplateProperty};
pub use model::workspace::Workspace;
pub use model::workspace_service::WorkspaceService;
pub use repo::resource_repo::{RepoError, RepoResult};
pub use repo::template_repo::ResourceTemplateRepository;
pub use repo::workspace_repo::WorkspaceRepository;
pub use repo::workspace_service_repo::WorkspaceServiceRepository;
pub use service::workspace_service_ops::WorkspaceServiceOps;
pub use store::{
    DocumentQuery, DocumentStore, SqliteDocumentStore, StoreError, StoreResult,
    RESOURCES_CONTAINER, RESOURCE_TEMPLATES_CONTAINER,
};
pub use template::{
    ResolvedTemplate, SchemaTemplateValidator, TemplateValidationError, TemplateValidator,
};

