//! Use-case services over the resource repositories.
//!
//! # Responsibility
//! - Compose repository calls into caller-facing operations.
//! - Keep CLI/API layers decoupled from document filters.

pub mod workspace_service_ops;
