//! Document store contracts.
//!
//! # Responsibility
//! - Define the query/write surface repositories rely on.
//! - Keep storage engine details behind the `DocumentStore` trait.
//!
//! # Invariants
//! - Documents are JSON objects carrying a string `id`.
//! - A store instance is bound to exactly one container.
//! - `query` never mutates; each write call is a single statement.

use crate::db::DbError;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod query;
pub mod sqlite_store;

pub use query::{DocumentQuery, FilterOp, FilterValue, Predicate};
pub use sqlite_store::SqliteDocumentStore;

/// Container holding workspace and workspace-service documents.
pub const RESOURCES_CONTAINER: &str = "resources";
/// Container holding resource template documents.
pub const RESOURCE_TEMPLATES_CONTAINER: &str = "resource_templates";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from document store reads and writes.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// A document with the same id already exists in the container.
    Conflict { container: String, id: String },
    /// The document has no string `id` field.
    MissingId,
    /// A stored body is not valid JSON.
    InvalidDocument(serde_json::Error),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Conflict { container, id } => {
                write!(f, "document `{id}` already exists in container `{container}`")
            }
            Self::MissingId => write!(f, "document is missing a string `id` field"),
            Self::InvalidDocument(err) => write!(f, "stored document is not valid JSON: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "document store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "document store requires table `{table}`")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidDocument(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query and write access to one container of JSON documents.
pub trait DocumentStore {
    /// Returns every document in the container matching all predicates.
    fn query(&self, query: &DocumentQuery) -> StoreResult<Vec<Value>>;
    /// Inserts a new document; fails with `Conflict` when the id exists.
    fn create_item(&self, document: &Value) -> StoreResult<()>;
    /// Inserts or fully replaces the document with the same id.
    fn upsert_item(&self, document: &Value) -> StoreResult<()>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn query(&self, query: &DocumentQuery) -> StoreResult<Vec<Value>> {
        (**self).query(query)
    }

    fn create_item(&self, document: &Value) -> StoreResult<()> {
        (**self).create_item(document)
    }

    fn upsert_item(&self, document: &Value) -> StoreResult<()> {
        (**self).upsert_item(document)
    }
}

pub(crate) fn document_id(document: &Value) -> StoreResult<&str> {
    document
        .get("id")
        .and_then(Value::as_str)
        .ok_or(StoreError::MissingId)
}
