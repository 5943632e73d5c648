//! Error type and helpers shared by resource repositories.

use crate::model::resource::{ResourceType, Status};
use crate::store::{DocumentQuery, DocumentStore, StoreError};
use crate::template::TemplateValidationError;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by resource repositories. None are retried here.
#[derive(Debug)]
pub enum RepoError {
    /// An id-scoped lookup matched no document.
    EntityNotFound,
    /// A deployed-only lookup found a resource in another state.
    ResourceNotDeployed,
    /// Template validator rejected the request; carried unchanged.
    Validation(TemplateValidationError),
    Store(StoreError),
    /// A stored document does not decode into the expected model.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntityNotFound => write!(f, "entity does not exist"),
            Self::ResourceNotDeployed => write!(f, "resource is not deployed"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted resource data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::EntityNotFound | Self::ResourceNotDeployed | Self::InvalidData(_) => None,
        }
    }
}

impl From<TemplateValidationError> for RepoError {
    fn from(value: TemplateValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Base filter for live resources of one type.
pub(crate) fn active_resources_query(resource_type: ResourceType) -> DocumentQuery {
    DocumentQuery::new()
        .eq("resourceType", resource_type.as_str())
        .ne("deployment.status", Status::Deleted.as_str())
}

/// Runs `query` once and decodes every returned document as `T`.
pub(crate) fn query_as<T, S>(store: &S, query: &DocumentQuery) -> RepoResult<Vec<T>>
where
    T: DeserializeOwned,
    S: DocumentStore + ?Sized,
{
    debug!("event=repo_query module=repo status=start query={query}");
    store
        .query(query)?
        .into_iter()
        .map(|document| {
            serde_json::from_value(document).map_err(|err| RepoError::InvalidData(err.to_string()))
        })
        .collect()
}

/// Takes the single result of an id-scoped lookup.
pub(crate) fn single<T>(mut items: Vec<T>) -> RepoResult<T> {
    match items.len() {
        0 => Err(RepoError::EntityNotFound),
        1 => Ok(items.remove(0)),
        count => Err(RepoError::InvalidData(format!(
            "id-scoped lookup matched {count} documents"
        ))),
    }
}

pub(crate) fn to_document<T: Serialize>(item: &T) -> RepoResult<Value> {
    serde_json::to_value(item).map_err(|err| RepoError::InvalidData(err.to_string()))
}
