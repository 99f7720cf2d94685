//! Builds parameterized CREATE TABLE, INSERT, SELECT, UPDATE, DELETE
//! statements for the three supported relational dialects.

use crate::schema::TableSpec;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlDialect {
    Sqlite,
    Mysql,
    Postgres,
}

impl SqlDialect {
    /// Positional placeholder, 1-based.
    fn placeholder(&self, n: usize) -> String {
        match self {
            SqlDialect::Postgres => format!("${}", n),
            SqlDialect::Sqlite | SqlDialect::Mysql => "?".to_string(),
        }
    }

    /// Quote an identifier (backticks for MySQL, double quotes elsewhere).
    pub fn quote(&self, ident: &str) -> String {
        match self {
            SqlDialect::Mysql => format!("`{}`", ident.replace('`', "``")),
            _ => format!("\"{}\"", ident.replace('"', "\"\"")),
        }
    }

    /// Auto-incrementing integer primary key clause for the `id` column.
    fn pk_clause(&self) -> &'static str {
        match self {
            SqlDialect::Sqlite => "INTEGER PRIMARY KEY AUTOINCREMENT",
            SqlDialect::Mysql => "BIGINT PRIMARY KEY AUTO_INCREMENT",
            SqlDialect::Postgres => "BIGSERIAL PRIMARY KEY",
        }
    }

    /// MySQL is the only supported dialect without INSERT ... RETURNING;
    /// it reports the generated key through the statement result instead.
    pub fn supports_returning(&self) -> bool {
        !matches!(self, SqlDialect::Mysql)
    }
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: Value) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

fn column_list(spec: &TableSpec, dialect: SqlDialect) -> String {
    spec.column_names()
        .iter()
        .map(|c| dialect.quote(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// CREATE TABLE IF NOT EXISTS with the implicit `id` primary key plus one
/// column per schema entry.
pub fn create_table(spec: &TableSpec, dialect: SqlDialect) -> String {
    let mut cols = vec![format!("{} {}", dialect.quote("id"), dialect.pk_clause())];
    for (name, ty) in &spec.columns {
        cols.push(format!("{} {}", dialect.quote(name), ty.sql_type()));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        dialect.quote(&spec.name),
        cols.join(", ")
    )
}

/// Single-row INSERT from the request body. The `id` key is dropped: the
/// primary key is system-generated, never client-supplied. Other keys pass
/// through as-is; an unknown column surfaces as a statement error.
pub fn insert(spec: &TableSpec, body: &Map<String, Value>, dialect: SqlDialect) -> QueryBuf {
    let mut q = QueryBuf::new();
    let table = dialect.quote(&spec.name);
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, value) in body {
        if name == "id" {
            continue;
        }
        let n = q.push_param(value.clone());
        cols.push(dialect.quote(name));
        placeholders.push(dialect.placeholder(n));
    }
    q.sql = if cols.is_empty() {
        match dialect {
            SqlDialect::Mysql => format!("INSERT INTO {} () VALUES ()", table),
            _ => format!("INSERT INTO {} DEFAULT VALUES", table),
        }
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            table,
            cols.join(", "),
            placeholders.join(", ")
        )
    };
    if dialect.supports_returning() {
        q.sql.push_str(" RETURNING ");
        q.sql.push_str(&dialect.quote("id"));
    }
    q
}

/// SELECT of every declared column, no ordering clause (storage-native order).
pub fn select_all(spec: &TableSpec, dialect: SqlDialect) -> String {
    format!(
        "SELECT {} FROM {}",
        column_list(spec, dialect),
        dialect.quote(&spec.name)
    )
}

/// SELECT one row by primary key. Caller binds the id as the sole parameter.
pub fn select_by_id(spec: &TableSpec, dialect: SqlDialect) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = {}",
        column_list(spec, dialect),
        dialect.quote(&spec.name),
        dialect.quote("id"),
        dialect.placeholder(1)
    )
}

/// Partial UPDATE by primary key: SET one clause per body key, id bound last.
/// Body keys are not filtered (an `id` key is last-write-wins, like any
/// other column). Returns None when the body is empty.
pub fn update(
    spec: &TableSpec,
    id: i64,
    body: &Map<String, Value>,
    dialect: SqlDialect,
) -> Option<QueryBuf> {
    if body.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, value) in body {
        let n = q.push_param(value.clone());
        sets.push(format!("{} = {}", dialect.quote(name), dialect.placeholder(n)));
    }
    let id_n = q.push_param(Value::Number(id.into()));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        dialect.quote(&spec.name),
        sets.join(", "),
        dialect.quote("id"),
        dialect.placeholder(id_n)
    );
    Some(q)
}

/// DELETE by primary key. Caller binds the id as the sole parameter.
pub fn delete(spec: &TableSpec, dialect: SqlDialect) -> String {
    format!(
        "DELETE FROM {} WHERE {} = {}",
        dialect.quote(&spec.name),
        dialect.quote("id"),
        dialect.placeholder(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;

    fn items() -> TableSpec {
        TableSpec::new(
            "items",
            &Schema::from_tags([("name", "string"), ("price", "float")]),
        )
    }

    #[test]
    fn create_table_per_dialect() {
        let spec = items();
        assert_eq!(
            create_table(&spec, SqlDialect::Sqlite),
            "CREATE TABLE IF NOT EXISTS \"items\" (\"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \"name\" TEXT, \"price\" DOUBLE PRECISION)"
        );
        assert!(create_table(&spec, SqlDialect::Postgres).contains("\"id\" BIGSERIAL PRIMARY KEY"));
        assert!(create_table(&spec, SqlDialect::Mysql).starts_with("CREATE TABLE IF NOT EXISTS `items`"));
    }

    #[test]
    fn insert_drops_client_supplied_id() {
        let spec = items();
        let body = json!({"id": 99, "name": "pen", "price": 1.5});
        let q = insert(&spec, body.as_object().unwrap(), SqlDialect::Sqlite);
        assert_eq!(
            q.sql,
            "INSERT INTO \"items\" (\"name\", \"price\") VALUES (?, ?) RETURNING \"id\""
        );
        assert_eq!(q.params, vec![json!("pen"), json!(1.5)]);
    }

    #[test]
    fn insert_empty_body_uses_defaults() {
        let spec = items();
        let body = serde_json::Map::new();
        let q = insert(&spec, &body, SqlDialect::Postgres);
        assert_eq!(q.sql, "INSERT INTO \"items\" DEFAULT VALUES RETURNING \"id\"");
        let q = insert(&spec, &body, SqlDialect::Mysql);
        assert_eq!(q.sql, "INSERT INTO `items` () VALUES ()");
    }

    #[test]
    fn update_binds_id_last() {
        let spec = items();
        let body = json!({"price": 2.0});
        let q = update(&spec, 1, body.as_object().unwrap(), SqlDialect::Postgres).unwrap();
        assert_eq!(q.sql, "UPDATE \"items\" SET \"price\" = $1 WHERE \"id\" = $2");
        assert_eq!(q.params, vec![json!(2.0), json!(1)]);
        assert!(update(&spec, 1, &serde_json::Map::new(), SqlDialect::Postgres).is_none());
    }

    #[test]
    fn select_and_delete_shapes() {
        let spec = items();
        assert_eq!(
            select_all(&spec, SqlDialect::Sqlite),
            "SELECT \"id\", \"name\", \"price\" FROM \"items\""
        );
        assert_eq!(
            select_by_id(&spec, SqlDialect::Postgres),
            "SELECT \"id\", \"name\", \"price\" FROM \"items\" WHERE \"id\" = $1"
        );
        assert_eq!(
            delete(&spec, SqlDialect::Sqlite),
            "DELETE FROM \"items\" WHERE \"id\" = ?"
        );
    }
}
