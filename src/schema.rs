//! Coarse field typing and the table descriptor produced at registration.

/// Coarse column type tags. Only used at table-creation time for relational
/// back-ends; document back-ends are schemaless and ignore them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    String,
    Float,
}

impl FieldType {
    /// Unrecognized tags default to `String`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "integer" => FieldType::Integer,
            "float" => FieldType::Float,
            _ => FieldType::String,
        }
    }

    /// Column type spelling valid across SQLite, MySQL, and PostgreSQL.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Integer => "INTEGER",
            FieldType::String => "TEXT",
            FieldType::Float => "DOUBLE PRECISION",
        }
    }
}

/// Ordered field name -> type mapping supplied by the caller.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    fields: Vec<(String, FieldType)>,
}

impl Schema {
    pub fn new() -> Self {
        Schema { fields: Vec::new() }
    }

    pub fn field(mut self, name: &str, ty: FieldType) -> Self {
        self.fields.push((name.to_string(), ty));
        self
    }

    /// Build from (name, tag) pairs, e.g. `[("price", "float")]`.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let fields = tags
            .into_iter()
            .map(|(name, tag)| (name.to_string(), FieldType::from_tag(tag)))
            .collect();
        Schema { fields }
    }

    pub fn fields(&self) -> &[(String, FieldType)] {
        &self.fields
    }
}

/// Opaque descriptor for a registered relational table: name plus the
/// user-declared columns. The `id` primary key is implicit.
#[derive(Clone, Debug)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<(String, FieldType)>,
}

impl TableSpec {
    pub fn new(name: &str, schema: &Schema) -> Self {
        TableSpec {
            name: name.to_string(),
            columns: schema.fields().to_vec(),
        }
    }

    /// All selectable column names, `id` first.
    pub fn column_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(self.columns.len() + 1);
        names.push("id");
        names.extend(self.columns.iter().map(|(n, _)| n.as_str()));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tag_defaults_to_string() {
        assert_eq!(FieldType::from_tag("integer"), FieldType::Integer);
        assert_eq!(FieldType::from_tag("float"), FieldType::Float);
        assert_eq!(FieldType::from_tag("string"), FieldType::String);
        assert_eq!(FieldType::from_tag("varchar"), FieldType::String);
        assert_eq!(FieldType::from_tag(""), FieldType::String);
    }

    #[test]
    fn table_spec_puts_id_first() {
        let schema = Schema::from_tags([("name", "string"), ("price", "float")]);
        let spec = TableSpec::new("items", &schema);
        assert_eq!(spec.column_names(), vec!["id", "name", "price"]);
    }
}
