//! Resource domain model.
//!
//! # Responsibility
//! - Define the JSON document shapes persisted in the resource containers.
//! - Define request models accepted by repository write paths.
//!
//! # Invariants
//! - Every resource is identified by a stable string id (a v4 UUID for new ones).
//! - Deletion is a deployment status, never a removed document.

pub mod resource;
pub mod schemas;
pub mod template;
pub mod workspace;
pub mod workspace_service;
