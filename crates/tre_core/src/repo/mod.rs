//! Repository layer over the document store.
//!
//! # Responsibility
//! - Translate resource use-cases into document filters and writes.
//! - Map empty lookups and deployment state to semantic errors.
//!
//! # Invariants
//! - Resource reads always filter by resource type and exclude deleted documents.
//! - Each repository call issues at most one query and at most one write.

pub mod resource_repo;
pub mod template_repo;
pub mod workspace_repo;
pub mod workspace_service_repo;
