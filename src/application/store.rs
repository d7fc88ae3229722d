//! Reducer-driven todo state.
//!
//! [`reduce`] is the whole transition table: it maps the previous state and one
//! event to the next state and performs no I/O. [`TodoStore`] owns the single
//! authoritative state and applies events strictly in dispatch order.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{
    record::{to_todo, RemoteRecord},
    todo::{Todo, TodoId},
};

/// Appended to the error message when an optimistic change is rolled back.
pub const REVERT_NOTICE: &str = "Reverting todo...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoState {
    pub todo_list: Vec<Todo>,
    pub is_loading: bool,
    pub is_saving: bool,
    pub error_message: String,
    /// Id of the most recently started fetch; results of older fetches are dropped.
    pub latest_fetch: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoEvent {
    FetchStarted { fetch_id: u64 },
    FetchSucceeded { fetch_id: u64, records: Vec<RemoteRecord> },
    FetchFailed { fetch_id: u64, message: String },
    SaveStarted,
    SaveSucceeded { record: RemoteRecord },
    /// Create failures land here; the list is untouched.
    SaveFailed { message: String },
    RequestEnded,
    TodoEdited { edited: Todo, error: Option<String> },
    TodoCompleted { id: TodoId },
    /// Restores the collection captured before an optimistic change.
    TodoReverted { snapshot: Vec<Todo>, message: String },
    ErrorCleared,
}

pub fn reduce(state: &TodoState, event: TodoEvent) -> TodoState {
    let mut next = state.clone();
    match event {
        TodoEvent::FetchStarted { fetch_id } => {
            next.is_loading = true;
            next.latest_fetch = fetch_id;
        }
        TodoEvent::FetchSucceeded { fetch_id, records } => {
            if fetch_id != state.latest_fetch { return next; }
            next.todo_list = records.into_iter().map(to_todo).collect();
            next.is_loading = false;
        }
        TodoEvent::FetchFailed { fetch_id, message } => {
            if fetch_id != state.latest_fetch { return next; }
            next.error_message = message;
            next.is_loading = false;
        }
        TodoEvent::SaveStarted => next.is_saving = true,
        TodoEvent::SaveSucceeded { record } => {
            next.todo_list.push(to_todo(record));
            next.is_saving = false;
        }
        TodoEvent::SaveFailed { message } => {
            next.error_message = message;
            next.is_saving = false;
        }
        TodoEvent::RequestEnded => {
            next.is_loading = false;
            next.is_saving = false;
        }
        TodoEvent::TodoEdited { edited, error } => {
            if let Some(todo) = next.todo_list.iter_mut().find(|t| t.id == edited.id) {
                todo.title = edited.title;
                todo.is_completed = edited.is_completed;
                if edited.created_time.is_some() { todo.created_time = edited.created_time; }
            }
            if let Some(message) = error { next.error_message = message; }
        }
        TodoEvent::TodoCompleted { id } => {
            if let Some(todo) = next.todo_list.iter_mut().find(|t| t.id == id) {
                todo.is_completed = true;
            }
        }
        TodoEvent::TodoReverted { snapshot, message } => {
            next.todo_list = snapshot;
            next.error_message = format!("{message}. {REVERT_NOTICE}");
        }
        TodoEvent::ErrorCleared => next.error_message.clear(),
    }
    next
}

/// Shared handle to the single store instance. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    state: Arc<Mutex<TodoState>>,
}

impl TodoStore {
    pub fn new(initial: TodoState) -> Self { Self { state: Arc::new(Mutex::new(initial)) } }

    pub fn dispatch(&self, event: TodoEvent) {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = reduce(&guard, event);
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> TodoState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn todo_list(&self) -> Vec<Todo> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).todo_list.clone()
    }

    pub fn find(&self, id: &TodoId) -> Option<Todo> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).todo_list.iter().find(|t| &t.id == id).cloned()
    }
}
