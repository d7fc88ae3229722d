use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote record store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoId(pub String);

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub is_completed: bool,
    /// Ordering key set by the server; never compared client side.
    pub created_time: Option<DateTime<Utc>>,
}

/// Partial field set sent on create and update. Absent fields are left untouched remotely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "isCompleted", skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TodoFields {
    pub fn new_todo(title: impl Into<String>) -> Self {
        Self { title: Some(title.into()), is_completed: Some(false) }
    }

    pub fn completed() -> Self {
        Self { title: None, is_completed: Some(true) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField { Title, #[default] CreatedTime }

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self { SortField::Title => "title", SortField::CreatedTime => "createdTime" }
    }

    pub fn toggled(self) -> Self {
        match self { SortField::Title => SortField::CreatedTime, SortField::CreatedTime => SortField::Title }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection { Asc, #[default] Desc }

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self { SortDirection::Asc => "asc", SortDirection::Desc => "desc" }
    }

    pub fn toggled(self) -> Self {
        match self { SortDirection::Asc => SortDirection::Desc, SortDirection::Desc => SortDirection::Asc }
    }
}

/// Server-side ordering and search applied to a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub sort_field: SortField,
    pub sort_direction: SortDirection,
    pub filter_text: String,
}

impl TodoQuery {
    /// `SEARCH("<text>",{title})`, or `None` when there is nothing to search for.
    pub fn filter_formula(&self) -> Option<String> {
        if self.filter_text.is_empty() { return None; }
        let escaped = self.filter_text.replace('\\', "\\\\").replace('"', "\\\"");
        Some(format!("SEARCH(\"{escaped}\",{{title}})"))
    }
}
