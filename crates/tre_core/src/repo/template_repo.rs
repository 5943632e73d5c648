//! Resource template repository.
//!
//! # Invariants
//! - At most one template per `(name, resource_type)` is `current`; more than
//!   one is reported as invalid data rather than picked arbitrarily.

use crate::model::resource::ResourceType;
use crate::model::template::ResourceTemplate;
use crate::repo::resource_repo::{query_as, single, to_document, RepoResult};
use crate::store::{DocumentQuery, DocumentStore};
use log::info;

pub struct ResourceTemplateRepository<S> {
    store: S,
}

impl<S: DocumentStore> ResourceTemplateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn current_template_query(name: &str, resource_type: ResourceType) -> DocumentQuery {
        DocumentQuery::new()
            .eq("resourceType", resource_type.as_str())
            .eq("name", name)
            .eq("current", true)
    }

    /// # Errors
    /// - `EntityNotFound` when no current template matches.
    pub fn get_current_template(
        &self,
        name: &str,
        resource_type: ResourceType,
    ) -> RepoResult<ResourceTemplate> {
        single(query_as(
            &self.store,
            &Self::current_template_query(name, resource_type),
        )?)
    }

    /// Writes a new template document. Fails on an existing id.
    pub fn save_template(&self, template: &ResourceTemplate) -> RepoResult<()> {
        self.store.create_item(&to_document(template)?)?;
        info!(
            "event=template_save module=repo status=ok name={} version={} current={}",
            template.name, template.version, template.current
        );
        Ok(())
    }
}
