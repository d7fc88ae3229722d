//! Wire shapes of the remote record store and the mapping to and from [`Todo`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::todo::{Todo, TodoFields, TodoId};

/// A record as returned by the remote store: `{id, fields, createdTime}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteRecord {
    pub id: String,
    #[serde(default)]
    pub fields: RecordFields,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<DateTime<Utc>>,
}

/// Checkbox columns are omitted by the server when unchecked, so every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "isCompleted", default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

/// Request payload for one record. `id` is absent on create.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub fields: TodoFields,
}

/// `{records: [...]}` envelope used in both directions. `offset` is the list cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Records<T> {
    pub records: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl<T> Records<T> {
    pub fn single(record: T) -> Self { Self { records: vec![record], offset: None } }
}

/// Normalizes a remote record. A missing completion flag becomes `false`.
pub fn to_todo(record: RemoteRecord) -> Todo {
    Todo {
        id: TodoId(record.id),
        title: record.fields.title.unwrap_or_default(),
        is_completed: record.fields.is_completed.unwrap_or(false),
        created_time: record.created_time,
    }
}

pub fn to_payload(id: Option<&TodoId>, fields: TodoFields) -> RecordPayload {
    RecordPayload { id: id.map(|id| id.0.clone()), fields }
}

impl From<&Todo> for RemoteRecord {
    fn from(todo: &Todo) -> Self {
        RemoteRecord {
            id: todo.id.0.clone(),
            fields: RecordFields { title: Some(todo.title.clone()), is_completed: Some(todo.is_completed) },
            created_time: todo.created_time,
        }
    }
}
