//! Storage adapters: one CRUD contract, two back-ends.
//!
//! Callers never branch on the back-end kind; the variant is picked once at
//! registration and hidden behind `Arc<dyn Storage>`.

mod document;
mod relational;

pub use document::DocumentStore;
pub use relational::RelationalStore;

use crate::error::AppError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// System-assigned record identifier, exposed as `id` regardless of back-end:
/// an auto-incrementing integer for relational rows, a 24-char ObjectId hex
/// string for documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Hex(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Hex(s) => f.write_str(s),
        }
    }
}

/// One operation per CRUD verb. The id arguments arrive as opaque path
/// strings; each adapter parses its own identifier form and treats a
/// malformed id as not-found (nothing can match it).
#[async_trait]
pub trait Storage: Send + Sync {
    /// Insert one record, returning the generated identifier.
    async fn create(&self, data: &Map<String, Value>) -> Result<RecordId, AppError>;

    /// All records in storage-native order, identifier under `id`.
    async fn list(&self) -> Result<Vec<Value>, AppError>;

    /// Fetch one record by identifier; `None` when absent.
    async fn find(&self, id: &str) -> Result<Option<Value>, AppError>;

    /// Partial field update of exactly one record. `Err(NotFound)` when zero
    /// records matched.
    async fn update(&self, id: &str, data: &Map<String, Value>) -> Result<(), AppError>;

    /// Remove exactly one record. Same not-found contract as `update`.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Handle to a registered resource's backing store.
pub type Resource = Arc<dyn Storage>;
