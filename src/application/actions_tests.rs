#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::super::actions::TodoActions;
    use super::super::coordinator::TodoCoordinator;
    use super::super::store::{TodoState, TodoStore, REVERT_NOTICE};
    use crate::domain::{
        gateway::TodoGateway,
        record::{RecordFields, RemoteRecord},
        todo::{Todo, TodoFields, TodoId, TodoQuery},
    };
    use crate::error::GatewayError;

    /// Every call parks until `release` is notified, then succeeds unless `fail` is set.
    #[derive(Clone)]
    struct GatedGateway {
        release: Arc<Notify>,
        fail: bool,
    }

    impl GatedGateway {
        async fn answer(&self, id: &str, title: Option<String>) -> Result<RemoteRecord, GatewayError> {
            self.release.notified().await;
            if self.fail { return Err(GatewayError::Network("timed out".into())); }
            Ok(RemoteRecord { id: id.into(), fields: RecordFields { title, is_completed: None }, created_time: None })
        }
    }

    #[async_trait]
    impl TodoGateway for GatedGateway {
        async fn list(&self, _query: &TodoQuery) -> Result<Vec<RemoteRecord>, GatewayError> {
            Ok(vec![self.answer("recL", Some("loaded".into())).await?])
        }

        async fn create(&self, fields: TodoFields) -> Result<RemoteRecord, GatewayError> {
            self.answer("recN", fields.title).await
        }

        async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<RemoteRecord, GatewayError> {
            self.answer(&id.0, fields.title).await
        }
    }

    fn todo(id: &str, title: &str, is_completed: bool) -> Todo {
        Todo { id: TodoId(id.into()), title: title.into(), is_completed, created_time: None }
    }

    fn gated_actions(fail: bool, todos: Vec<Todo>) -> (Arc<Notify>, TodoActions<GatedGateway>) {
        let release = Arc::new(Notify::new());
        let gateway = GatedGateway { release: Arc::clone(&release), fail };
        let store = TodoStore::new(TodoState { todo_list: todos, ..TodoState::default() });
        (release, TodoActions::new(TodoCoordinator::new(gateway, store)))
    }

    /// Polls the store until `ready` holds, failing after a second.
    async fn wait_for(store: &TodoStore, ready: impl Fn(&TodoState) -> bool) {
        tokio::time::timeout(Duration::from_secs(1), async {
            while !ready(&store.snapshot()) {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("store never reached the expected state");
    }

    #[tokio::test]
    async fn completion_is_visible_while_request_is_in_flight() {
        let (release, actions) = gated_actions(true, vec![todo("a", "x", false)]);
        let handle = actions.complete_todo(TodoId("a".into()));

        wait_for(actions.store(), |s| s.todo_list[0].is_completed).await;
        assert!(!handle.is_finished());

        release.notify_one();
        handle.await.unwrap();
        let state = actions.store().snapshot();
        assert_eq!(state.todo_list, vec![todo("a", "x", false)]);
        assert!(state.error_message.ends_with(REVERT_NOTICE));
    }

    #[tokio::test]
    async fn flags_are_visible_while_requests_are_in_flight() {
        let (release, actions) = gated_actions(false, vec![]);
        let load = actions.load(TodoQuery::default());
        wait_for(actions.store(), |s| s.is_loading).await;
        release.notify_one();
        load.await.unwrap();
        assert_eq!(actions.store().todo_list(), vec![todo("recL", "loaded", false)]);

        let create = actions.add_todo("buy milk".into());
        wait_for(actions.store(), |s| s.is_saving).await;
        assert!(!create.is_finished());
        release.notify_one();
        let created = create.await.unwrap().unwrap();
        assert_eq!(created.id, TodoId("recN".into()));
        assert!(!actions.store().snapshot().is_saving);
    }

    #[tokio::test]
    async fn edit_is_visible_before_it_persists() {
        let (release, actions) = gated_actions(false, vec![todo("a", "x", false)]);
        let handle = actions.update_todo(todo("a", "renamed", false));
        wait_for(actions.store(), |s| s.todo_list[0].title == "renamed").await;
        release.notify_one();
        handle.await.unwrap();
        assert_eq!(actions.store().todo_list(), vec![todo("a", "renamed", false)]);
    }
}
