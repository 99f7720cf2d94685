//! Relational adapter: SQLite, MySQL, or PostgreSQL through sqlx's Any driver.

use crate::error::AppError;
use crate::schema::TableSpec;
use crate::sql::{self, AnyBindValue, QueryBuf, SqlDialect};
use crate::store::{RecordId, Storage};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::any::AnyRow;
use sqlx::AnyPool;

pub struct RelationalStore {
    pool: AnyPool,
    dialect: SqlDialect,
    spec: TableSpec,
}

impl RelationalStore {
    pub fn new(pool: AnyPool, dialect: SqlDialect, spec: TableSpec) -> Self {
        RelationalStore {
            pool,
            dialect,
            spec,
        }
    }

    fn bind_all<'q>(
        q: &'q QueryBuf,
    ) -> sqlx::query::Query<'q, sqlx::Any, sqlx::any::AnyArguments<'q>> {
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(AnyBindValue::from_json(p));
        }
        query
    }

    /// Relational identifiers are integers; anything else matches no row.
    fn parse_id(id: &str) -> Option<i64> {
        id.parse().ok()
    }
}

#[async_trait]
impl Storage for RelationalStore {
    async fn create(&self, data: &Map<String, Value>) -> Result<RecordId, AppError> {
        let q = sql::insert(&self.spec, data, self.dialect);
        tracing::debug!(sql = %q.sql, params = ?q.params, "insert");
        let id = if self.dialect.supports_returning() {
            let row = Self::bind_all(&q).fetch_one(&self.pool).await?;
            use sqlx::Row;
            row.try_get::<i64, _>(0)?
        } else {
            let result = Self::bind_all(&q).execute(&self.pool).await?;
            result.last_insert_id().ok_or(sqlx::Error::RowNotFound)?
        };
        Ok(RecordId::Int(id))
    }

    async fn list(&self) -> Result<Vec<Value>, AppError> {
        let sql = sql::select_all(&self.spec, self.dialect);
        tracing::debug!(sql = %sql, "select");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<Value>, AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Ok(None);
        };
        let sql = sql::select_by_id(&self.spec, self.dialect);
        tracing::debug!(sql = %sql, id, "select");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(row_to_json))
    }

    async fn update(&self, id: &str, data: &Map<String, Value>) -> Result<(), AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Err(AppError::NotFound);
        };
        let Some(q) = sql::update(&self.spec, id, data, self.dialect) else {
            // Nothing to set; report whether the record exists.
            return match self.find(&id.to_string()).await? {
                Some(_) => Ok(()),
                None => Err(AppError::NotFound),
            };
        };
        tracing::debug!(sql = %q.sql, params = ?q.params, "update");
        let result = Self::bind_all(&q).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let Some(id) = Self::parse_id(id) else {
            return Err(AppError::NotFound);
        };
        let sql = sql::delete(&self.spec, self.dialect);
        tracing::debug!(sql = %sql, id, "delete");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

fn row_to_json(row: &AnyRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &AnyRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        if let Some(n) = serde_json::Number::from_f64(n) {
            return Value::Number(n);
        }
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
