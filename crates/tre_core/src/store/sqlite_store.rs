//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist JSON documents in the `documents` table, partitioned by container.
//! - Evaluate `DocumentQuery` predicates with `json_extract` and bound values.
//!
//! # Invariants
//! - Every statement is scoped to the store's container.
//! - Query text never interpolates caller values; paths and literals are bound.
//! - Results come back in insertion order; upserts keep a document's position.

use super::query::{DocumentQuery, FilterValue};
use super::{document_id, DocumentStore, StoreError, StoreResult};
use crate::db::migrations::{current_user_version, latest_version};
use log::debug;
use rusqlite::types::Value as SqlValue;
use rusqlite::{params, params_from_iter, Connection, ErrorCode};
use serde_json::Value;

/// Document store over one container of a migrated SQLite connection.
pub struct SqliteDocumentStore<'conn> {
    conn: &'conn Connection,
    container: String,
}

impl<'conn> SqliteDocumentStore<'conn> {
    /// Binds a store to `container` on a migrated connection.
    pub fn try_new(conn: &'conn Connection, container: impl Into<String>) -> StoreResult<Self> {
        ensure_store_connection_ready(conn)?;
        Ok(Self {
            conn,
            container: container.into(),
        })
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn query(&self, query: &DocumentQuery) -> StoreResult<Vec<Value>> {
        let mut sql = String::from("SELECT body FROM documents WHERE container = ?");
        let mut bind_values = vec![SqlValue::Text(self.container.clone())];

        for predicate in query.predicates() {
            sql.push_str(" AND json_extract(body, ?) ");
            sql.push_str(predicate.op.as_str());
            sql.push_str(" ?");
            bind_values.push(SqlValue::Text(format!("$.{}", predicate.path)));
            bind_values.push(match &predicate.value {
                FilterValue::Text(text) => SqlValue::Text(text.clone()),
                FilterValue::Bool(flag) => SqlValue::Integer(i64::from(*flag)),
            });
        }
        sql.push_str(" ORDER BY rowid ASC;");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            documents.push(serde_json::from_str(&body).map_err(StoreError::InvalidDocument)?);
        }

        debug!(
            "event=store_query module=store status=ok container={} predicates={} rows={}",
            self.container,
            query.predicates().len(),
            documents.len()
        );
        Ok(documents)
    }

    fn create_item(&self, document: &Value) -> StoreResult<()> {
        let id = document_id(document)?;
        let result = self.conn.execute(
            "INSERT INTO documents (container, id, body) VALUES (?1, ?2, ?3);",
            params![self.container, id, document.to_string()],
        );

        match result {
            Ok(_) => {
                debug!(
                    "event=store_create module=store status=ok container={} id={id}",
                    self.container
                );
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::Conflict {
                    container: self.container.clone(),
                    id: id.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn upsert_item(&self, document: &Value) -> StoreResult<()> {
        let id = document_id(document)?;
        self.conn.execute(
            "INSERT INTO documents (container, id, body) VALUES (?1, ?2, ?3)
             ON CONFLICT (container, id) DO UPDATE SET
                body = excluded.body,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![self.container, id, document.to_string()],
        )?;

        debug!(
            "event=store_upsert module=store status=ok container={} id={id}",
            self.container
        );
        Ok(())
    }
}

fn ensure_store_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'documents'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::MissingRequiredTable("documents"));
    }

    Ok(())
}
