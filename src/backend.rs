//! Backend construction and schema registration.

use crate::error::{AppError, ConfigError};
use crate::schema::{Schema, TableSpec};
use crate::sql::{self, SqlDialect};
use crate::store::{DocumentStore, RelationalStore, Resource};
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::Once;

/// The four recognized storage tags. Anything else is a fatal
/// configuration error at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Mysql,
    Postgres,
    MongoDb,
}

impl FromStr for StorageKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sqlite" => Ok(StorageKind::Sqlite),
            "mysql" => Ok(StorageKind::Mysql),
            "postgres" => Ok(StorageKind::Postgres),
            "mongodb" => Ok(StorageKind::MongoDb),
            other => Err(ConfigError::UnsupportedKind(other.to_string())),
        }
    }
}

impl StorageKind {
    fn scheme(&self) -> &'static str {
        match self {
            StorageKind::Sqlite => "sqlite",
            StorageKind::Mysql => "mysql",
            StorageKind::Postgres => "postgres",
            StorageKind::MongoDb => "mongodb",
        }
    }

    fn dialect(&self) -> Option<SqlDialect> {
        match self {
            StorageKind::Sqlite => Some(SqlDialect::Sqlite),
            StorageKind::Mysql => Some(SqlDialect::Mysql),
            StorageKind::Postgres => Some(SqlDialect::Postgres),
            StorageKind::MongoDb => None,
        }
    }

    /// Build the driver URL from a bare URI (file path, host/db, ...).
    /// URIs that already carry a scheme pass through unchanged.
    fn connection_url(&self, uri: &str) -> String {
        if uri.contains("://") || uri.starts_with("sqlite:") {
            uri.to_string()
        } else {
            format!("{}://{}", self.scheme(), uri)
        }
    }
}

#[derive(Debug)]
enum Inner {
    Sql { pool: AnyPool, dialect: SqlDialect },
    Mongo { db: mongodb::Database },
}

/// A connected storage back-end. Registering a schema yields a [`Resource`]
/// handle that the route binder dispatches to; the relational/document
/// split is fixed here and never branched on again.
#[derive(Debug)]
pub struct Backend {
    inner: Inner,
}

impl Backend {
    /// Connect with a storage kind tag: `sqlite`, `mysql`, `postgres`, or
    /// `mongodb`.
    pub async fn connect(kind: &str, uri: &str) -> Result<Self, AppError> {
        Self::connect_with(kind.parse()?, uri).await
    }

    pub async fn connect_with(kind: StorageKind, uri: &str) -> Result<Self, AppError> {
        let url = kind.connection_url(uri);
        let inner = match kind.dialect() {
            None => {
                let client = mongodb::Client::with_uri_str(&url).await?;
                let db = client
                    .default_database()
                    .ok_or(ConfigError::MissingDatabase)?;
                Inner::Mongo { db }
            }
            Some(dialect) => {
                install_drivers();
                // An in-memory SQLite database is private to its connection;
                // a second pooled connection would see an empty database.
                let max_connections = if url.contains(":memory:") { 1 } else { 5 };
                let pool = AnyPoolOptions::new()
                    .max_connections(max_connections)
                    .connect(&url)
                    .await?;
                Inner::Sql { pool, dialect }
            }
        };
        tracing::info!(kind = ?kind, "backend connected");
        Ok(Backend { inner })
    }

    /// Register a resource schema, returning its storage handle.
    ///
    /// Relational back-ends get a `CREATE TABLE IF NOT EXISTS` with an
    /// auto-incrementing `id` primary key, so re-registering the same
    /// resource is a no-op. Document back-ends ignore the schema: the
    /// collection is created on first write.
    pub async fn register(&self, name: &str, schema: &Schema) -> Result<Resource, AppError> {
        match &self.inner {
            Inner::Sql { pool, dialect } => {
                let spec = TableSpec::new(name, schema);
                let ddl = sql::create_table(&spec, *dialect);
                tracing::info!(table = name, "ensure table");
                sqlx::query(&ddl).execute(pool).await?;
                Ok(Arc::new(RelationalStore::new(pool.clone(), *dialect, spec)))
            }
            Inner::Mongo { db } => Ok(Arc::new(DocumentStore::new(db.collection(name)))),
        }
    }
}

fn install_drivers() {
    static DRIVERS: Once = Once::new();
    DRIVERS.call_once(sqlx::any::install_default_drivers);
}
