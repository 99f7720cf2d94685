//! Document adapter: a MongoDB collection. Schemaless; the driver generates
//! a 12-byte ObjectId per document, exposed to callers as a hex `id` string.

use crate::error::AppError;
use crate::store::{RecordId, Storage};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::Collection;
use serde_json::{Map, Value};

pub struct DocumentStore {
    collection: Collection<Document>,
}

impl DocumentStore {
    pub fn new(collection: Collection<Document>) -> Self {
        DocumentStore { collection }
    }

    /// Document identifiers are ObjectId hex; anything else matches nothing.
    fn parse_id(id: &str) -> Option<ObjectId> {
        ObjectId::parse_str(id).ok()
    }
}

#[async_trait]
impl Storage for DocumentStore {
    async fn create(&self, data: &Map<String, Value>) -> Result<RecordId, AppError> {
        let doc = map_to_document(data);
        tracing::debug!(collection = %self.collection.name(), "insert_one");
        let result = self.collection.insert_one(doc).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(RecordId::Hex(id))
    }

    async fn list(&self) -> Result<Vec<Value>, AppError> {
        tracing::debug!(collection = %self.collection.name(), "find");
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut records = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            records.push(document_to_record(doc));
        }
        Ok(records)
    }

    async fn find(&self, id: &str) -> Result<Option<Value>, AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Ok(None);
        };
        let doc = self.collection.find_one(doc! { "_id": oid }).await?;
        Ok(doc.map(document_to_record))
    }

    async fn update(&self, id: &str, data: &Map<String, Value>) -> Result<(), AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Err(AppError::NotFound);
        };
        if data.is_empty() {
            // MongoDB rejects an empty $set; report whether the record exists.
            return match self.find(id).await? {
                Some(_) => Ok(()),
                None => Err(AppError::NotFound),
            };
        }
        tracing::debug!(collection = %self.collection.name(), id, "update_one");
        let result = self
            .collection
            .update_one(doc! { "_id": oid }, doc! { "$set": map_to_document(data) })
            .await?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let Some(oid) = Self::parse_id(id) else {
            return Err(AppError::NotFound);
        };
        tracing::debug!(collection = %self.collection.name(), id, "delete_one");
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}

/// Replace the internal `_id` with a hex `id` field; the raw ObjectId is
/// never exposed to callers.
fn document_to_record(mut doc: Document) -> Value {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => Some(oid.to_hex()),
        Some(other) => Some(other.to_string()),
        None => None,
    };
    let mut map: Map<String, Value> = doc
        .into_iter()
        .map(|(k, v)| (k, bson_to_json(v)))
        .collect();
    if let Some(id) = id {
        map.insert("id".to_string(), Value::String(id));
    }
    Value::Object(map)
}

fn map_to_document(data: &Map<String, Value>) -> Document {
    data.iter()
        .map(|(k, v)| (k.clone(), json_to_bson(v)))
        .collect()
}

fn json_to_bson(v: &Value) -> Bson {
    match v {
        Value::Null => Bson::Null,
        Value::Bool(b) => Bson::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Bson::Int64(i)
            } else {
                n.as_f64().map(Bson::Double).unwrap_or(Bson::Null)
            }
        }
        Value::String(s) => Bson::String(s.clone()),
        Value::Array(items) => Bson::Array(items.iter().map(json_to_bson).collect()),
        Value::Object(map) => Bson::Document(map_to_document(map)),
    }
}

fn bson_to_json(b: Bson) -> Value {
    match b {
        Bson::Null => Value::Null,
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(n) => Value::Number(n.into()),
        Bson::Int64(n) => Value::Number(n.into()),
        Bson::Double(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => {
            Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect())
        }
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn internal_id_becomes_hex_string() {
        let oid = ObjectId::new();
        let doc = doc! { "_id": oid, "name": "pen", "price": 1.5 };
        let record = document_to_record(doc);
        assert_eq!(record["name"], json!("pen"));
        assert_eq!(record["price"], json!(1.5));
        assert_eq!(record["id"], json!(oid.to_hex()));
        assert!(record.get("_id").is_none());
    }

    #[test]
    fn exposed_id_round_trips_as_object_id() {
        let oid = ObjectId::new();
        let hex = oid.to_hex();
        assert_eq!(hex.len(), 24);
        assert_eq!(DocumentStore::parse_id(&hex), Some(oid));
        assert_eq!(DocumentStore::parse_id("1"), None);
        assert_eq!(DocumentStore::parse_id("not-an-id"), None);
    }

    #[test]
    fn json_bson_conversion_preserves_scalars() {
        let body = json!({
            "name": "pen",
            "price": 1.5,
            "count": 3,
            "active": true,
            "tags": ["a", "b"],
            "extra": { "note": null }
        });
        let doc = map_to_document(body.as_object().unwrap());
        assert_eq!(doc.get_str("name").unwrap(), "pen");
        assert_eq!(doc.get_f64("price").unwrap(), 1.5);
        assert_eq!(doc.get_i64("count").unwrap(), 3);
        let back = document_to_record(doc);
        assert_eq!(back, body);
    }

    #[test]
    fn empty_update_body_converts_to_an_empty_set_document() {
        // MongoDB rejects `$set: {}`, which is why `update` falls back to an
        // existence check before building the update document.
        let body = serde_json::Map::new();
        assert!(map_to_document(&body).is_empty());
        let nonempty = json!({"price": 2.0});
        assert!(!map_to_document(nonempty.as_object().unwrap()).is_empty());
    }

    #[test]
    fn int32_documents_read_back_as_numbers() {
        let doc = doc! { "n": 7i32 };
        assert_eq!(document_to_record(doc), json!({ "n": 7 }));
    }
}
