//! Read-only access to externally written number-data documents.

use serde_json::{Map, Value};

use super::models::NumberDataRow;
use super::Store;
use crate::error::{AppError, Result};

impl NumberDataRow {
    /// Stored JSON body with `_id`, `source` and `timestamp` filled in from the row.
    fn into_document(self) -> Result<Value> {
        let mut doc = match serde_json::from_str::<Value>(&self.document)? {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        doc.insert("_id".to_string(), Value::String(self.id));
        if let Some(source) = self.source {
            doc.entry("source").or_insert(Value::String(source));
        }
        if let Some(timestamp) = self.timestamp {
            doc.entry("timestamp").or_insert(Value::String(timestamp));
        }
        Ok(Value::Object(doc))
    }
}

impl Store {
    /// Newest `timestamp` first.
    pub async fn list_number_data(&self) -> Result<Vec<Value>> {
        let rows = sqlx::query_as::<_, NumberDataRow>(
            "SELECT id, source, timestamp, document FROM number_data ORDER BY timestamp DESC",
        )
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(NumberDataRow::into_document).collect()
    }

    pub async fn get_number_data(&self, id: &str) -> Result<Value> {
        sqlx::query_as::<_, NumberDataRow>(
            "SELECT id, source, timestamp, document FROM number_data WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| AppError::NotFound("Number data not found".to_string()))?
        .into_document()
    }

    /// Every entry of every document's `data` array, tagged with where it came from.
    pub async fn number_data_chart_entries(&self) -> Result<Vec<Value>> {
        let documents = self.list_number_data().await?;
        Ok(flatten_chart_entries(&documents))
    }
}

pub fn flatten_chart_entries(documents: &[Value]) -> Vec<Value> {
    let mut entries = Vec::new();
    for doc in documents {
        let Some(data) = doc.get("data").and_then(Value::as_array) else {
            continue;
        };
        for (index, entry) in data.iter().enumerate() {
            let mut out = match entry {
                Value::Object(map) => map.clone(),
                other => {
                    let mut map = Map::new();
                    map.insert("value".to_string(), other.clone());
                    map
                }
            };
            out.insert("source".to_string(), doc.get("source").cloned().unwrap_or(Value::Null));
            out.insert("timestamp".to_string(), doc.get("timestamp").cloned().unwrap_or(Value::Null));
            out.insert("documentId".to_string(), doc.get("_id").cloned().unwrap_or(Value::Null));
            out.insert("index".to_string(), Value::from(index));
            entries.push(Value::Object(out));
        }
    }
    entries
}
