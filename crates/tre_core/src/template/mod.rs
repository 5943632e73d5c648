//! Template validation for resource create requests.
//!
//! # Responsibility
//! - Define the `TemplateValidator` seam repositories delegate to.
//! - Provide the schema-backed validator that reads current templates.
//!
//! # Invariants
//! - A successful validation always resolves to one concrete template version.
//! - Validation never mutates the requested properties.

pub mod schema;
pub mod validator;

pub use schema::SchemaTemplateValidator;
pub use validator::{ResolvedTemplate, TemplateValidationError, TemplateValidator};
