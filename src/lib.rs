//! Crudify: instant CRUD routes for axum over SQL tables or MongoDB collections.
//!
//! Register a schema against a [`Backend`], then mount the returned resource
//! handle with [`crud_routes`]:
//!
//! ```no_run
//! use crudify::{Backend, Schema, FieldType, Permissions, crud_routes};
//!
//! # async fn run() -> Result<(), crudify::AppError> {
//! let backend = Backend::connect("sqlite", "app.db").await?;
//! let items = backend
//!     .register("items", &Schema::new().field("name", FieldType::String).field("price", FieldType::Float))
//!     .await?;
//! let app: axum::Router = crud_routes("items", items, Permissions::default());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod sql;
pub mod store;

pub use backend::{Backend, StorageKind};
pub use error::{AppError, ConfigError};
pub use routes::{common_routes, crud_routes, Permissions};
pub use schema::{FieldType, Schema};
pub use store::{RecordId, Resource, Storage};
