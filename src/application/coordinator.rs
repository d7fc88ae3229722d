use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{
    gateway::TodoGateway,
    todo::{Todo, TodoFields, TodoId, TodoQuery},
};
use super::store::{TodoEvent, TodoStore};

/// Runs every remote operation and turns its outcome into store events.
///
/// Mutations are optimistic: the store changes first, the gateway is called
/// second, and a failure restores the collection captured at invocation time.
/// Overlapping mutations each restore their own capture, so the last rollback wins.
pub struct TodoCoordinator<G: TodoGateway> {
    gateway: G,
    store: TodoStore,
    fetches: AtomicU64,
}

impl<G: TodoGateway> TodoCoordinator<G> {
    pub fn new(gateway: G, store: TodoStore) -> Self {
        Self { gateway, store, fetches: AtomicU64::new(0) }
    }

    pub fn store(&self) -> &TodoStore { &self.store }

    /// Replaces the collection with the server's view for `query`.
    /// Only the most recently started load is allowed to land.
    pub async fn load(&self, query: &TodoQuery) {
        let fetch_id = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.dispatch(TodoEvent::FetchStarted { fetch_id });
        match self.gateway.list(query).await {
            Ok(records) => {
                if fetch_id != self.store.snapshot().latest_fetch {
                    tracing::debug!(fetch_id, "discarding stale fetch result");
                }
                self.store.dispatch(TodoEvent::FetchSucceeded { fetch_id, records });
            }
            Err(error) => {
                tracing::warn!(fetch_id, %error, "failed to load todos");
                self.store.dispatch(TodoEvent::FetchFailed { fetch_id, message: error.to_string() });
            }
        }
    }

    /// Persists a new todo and appends the server's record. Blank titles are ignored.
    pub async fn add_todo(&self, title: &str) -> Option<Todo> {
        let title = title.trim();
        if title.is_empty() {
            tracing::debug!("ignoring blank todo title");
            return None;
        }
        self.store.dispatch(TodoEvent::SaveStarted);
        let created = match self.gateway.create(TodoFields::new_todo(title)).await {
            Ok(record) => {
                let id = TodoId(record.id.clone());
                self.store.dispatch(TodoEvent::SaveSucceeded { record });
                tracing::info!(%id, "todo created");
                self.store.find(&id)
            }
            Err(error) => {
                tracing::warn!(%error, "failed to create todo");
                self.store.dispatch(TodoEvent::SaveFailed { message: error.to_string() });
                None
            }
        };
        self.store.dispatch(TodoEvent::RequestEnded);
        created
    }

    /// Optimistically replaces the todo's title and completion flag.
    pub async fn update_todo(&self, edited: Todo) {
        if edited.title.trim().is_empty() {
            tracing::debug!(id = %edited.id, "ignoring blank title edit");
            return;
        }
        if self.store.find(&edited.id).is_none() {
            tracing::debug!(id = %edited.id, "edit for unknown todo");
            return;
        }
        let snapshot = self.store.todo_list();
        let fields = TodoFields { title: Some(edited.title.clone()), is_completed: Some(edited.is_completed) };
        let id = edited.id.clone();
        self.store.dispatch(TodoEvent::TodoEdited { edited, error: None });

        if let Err(error) = self.gateway.update(&id, fields).await {
            tracing::warn!(%id, %error, "rolling back todo edit");
            self.store.dispatch(TodoEvent::TodoReverted { snapshot, message: error.to_string() });
        }
    }

    /// Optimistically marks the todo completed.
    pub async fn complete_todo(&self, id: &TodoId) {
        if self.store.find(id).is_none() {
            tracing::debug!(%id, "complete for unknown todo");
            return;
        }
        let snapshot = self.store.todo_list();
        self.store.dispatch(TodoEvent::TodoCompleted { id: id.clone() });

        if let Err(error) = self.gateway.update(id, TodoFields::completed()).await {
            tracing::warn!(%id, %error, "rolling back todo completion");
            self.store.dispatch(TodoEvent::TodoReverted { snapshot, message: error.to_string() });
        }
    }

    pub fn clear_error(&self) {
        self.store.dispatch(TodoEvent::ErrorCleared);
    }
}
