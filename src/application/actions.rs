use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::domain::{
    gateway::TodoGateway,
    todo::{Todo, TodoId, TodoQuery},
};
use super::{coordinator::TodoCoordinator, store::TodoStore};

/// Runs coordinator operations as background tasks so callers never wait on the network.
///
/// Each call returns as soon as the task is spawned; progress and results are read
/// back from the store. Must be used inside a tokio runtime.
pub struct TodoActions<G: TodoGateway> {
    coordinator: Arc<TodoCoordinator<G>>,
}

impl<G: TodoGateway> Clone for TodoActions<G> {
    fn clone(&self) -> Self { Self { coordinator: Arc::clone(&self.coordinator) } }
}

impl<G: TodoGateway> TodoActions<G> {
    pub fn new(coordinator: TodoCoordinator<G>) -> Self {
        Self { coordinator: Arc::new(coordinator) }
    }

    pub fn store(&self) -> &TodoStore { self.coordinator.store() }

    pub fn load(&self, query: TodoQuery) -> JoinHandle<()> {
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move { coordinator.load(&query).await })
    }

    pub fn add_todo(&self, title: String) -> JoinHandle<Option<Todo>> {
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move { coordinator.add_todo(&title).await })
    }

    pub fn update_todo(&self, edited: Todo) -> JoinHandle<()> {
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move { coordinator.update_todo(edited).await })
    }

    pub fn complete_todo(&self, id: TodoId) -> JoinHandle<()> {
        let coordinator = Arc::clone(&self.coordinator);
        tokio::spawn(async move { coordinator.complete_todo(&id).await })
    }

    pub fn clear_error(&self) { self.coordinator.clear_error(); }
}
