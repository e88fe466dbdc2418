use chrono::{DateTime, SecondsFormat, Utc};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A laptop record exactly as stored.
///
/// The collection is populated outside this service, so the document is kept
/// opaque; only the fields the catalog queries on get typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Laptop(pub Document);

impl Laptop {
    pub fn new(document: Document) -> Self {
        Self(document)
    }

    pub fn id(&self) -> Option<ObjectId> {
        self.0.get_object_id("_id").ok()
    }

    pub fn brand(&self) -> Option<&str> {
        self.0.get_str("brand").ok()
    }

    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(as_f64)
    }

    pub fn average_rating(&self) -> Option<f64> {
        self.0
            .get_document("ratings")
            .ok()
            .and_then(|ratings| ratings.get("average"))
            .and_then(as_f64)
    }

    pub fn is_on_flash_sale(&self) -> bool {
        self.0.get_bool("isOnFlashSale").unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.0
            .get_datetime("createdAt")
            .ok()
            .map(|dt| dt.to_chrono())
    }

    /// Renders the record the way API clients expect: ObjectIds as hex
    /// strings, datetimes as RFC 3339 with millisecond precision.
    pub fn into_json(self) -> Value {
        document_to_json(self.0)
    }
}

impl From<Document> for Laptop {
    fn from(document: Document) -> Self {
        Self(document)
    }
}

fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(v) => Some(*v),
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        _ => None,
    }
}

fn document_to_json(document: Document) -> Value {
    let map: Map<String, Value> = document
        .into_iter()
        .map(|(key, value)| (key, bson_to_json(value)))
        .collect();
    Value::Object(map)
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(
            dt.to_chrono()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        Bson::Double(v) => Number::from_f64(v).map_or(Value::Null, Value::Number),
        Bson::Int32(v) => Value::Number(v.into()),
        Bson::Int64(v) => Value::Number(v.into()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(doc) => document_to_json(doc),
        other => other.into_relaxed_extjson(),
    }
}
