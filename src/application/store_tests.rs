#[cfg(test)]
mod tests {
    use super::super::store::{reduce, TodoEvent, TodoState, TodoStore, REVERT_NOTICE};
    use crate::domain::{
        record::{RecordFields, RemoteRecord},
        todo::{Todo, TodoId},
    };

    fn record(id: &str, title: &str, is_completed: Option<bool>) -> RemoteRecord {
        RemoteRecord { id: id.into(), fields: RecordFields { title: Some(title.into()), is_completed }, created_time: None }
    }

    fn todo(id: &str, title: &str, is_completed: bool) -> Todo {
        Todo { id: TodoId(id.into()), title: title.into(), is_completed, created_time: None }
    }

    fn loaded(todos: Vec<Todo>) -> TodoState {
        TodoState { todo_list: todos, ..TodoState::default() }
    }

    #[test]
    fn fetch_lifecycle() {
        let state = reduce(&TodoState::default(), TodoEvent::FetchStarted { fetch_id: 1 });
        assert!(state.is_loading);
        let state = reduce(&state, TodoEvent::FetchSucceeded { fetch_id: 1, records: vec![record("a", "x", None), record("b", "y", Some(true))] });
        assert!(!state.is_loading);
        assert_eq!(state.todo_list, vec![todo("a", "x", false), todo("b", "y", true)]);
    }

    #[test]
    fn fetch_failure_sets_message() {
        let state = reduce(&TodoState::default(), TodoEvent::FetchStarted { fetch_id: 1 });
        let state = reduce(&state, TodoEvent::FetchFailed { fetch_id: 1, message: "Network error: refused".into() });
        assert!(!state.is_loading);
        assert_eq!(state.error_message, "Network error: refused");
    }

    #[test]
    fn stale_fetch_result_is_ignored() {
        let state = reduce(&TodoState::default(), TodoEvent::FetchStarted { fetch_id: 1 });
        let state = reduce(&state, TodoEvent::FetchStarted { fetch_id: 2 });
        let state = reduce(&state, TodoEvent::FetchSucceeded { fetch_id: 2, records: vec![record("new", "newer", None)] });
        let state = reduce(&state, TodoEvent::FetchSucceeded { fetch_id: 1, records: vec![record("old", "older", None)] });
        let state = reduce(&state, TodoEvent::FetchFailed { fetch_id: 1, message: "late".into() });
        assert_eq!(state.todo_list, vec![todo("new", "newer", false)]);
        assert!(state.error_message.is_empty());
    }

    #[test]
    fn save_appends_server_record() {
        let state = reduce(&loaded(vec![todo("a", "x", false)]), TodoEvent::SaveStarted);
        assert!(state.is_saving);
        let state = reduce(&state, TodoEvent::SaveSucceeded { record: record("rec123", "buy milk", None) });
        assert!(!state.is_saving);
        assert_eq!(state.todo_list.last(), Some(&todo("rec123", "buy milk", false)));
        assert_eq!(state.todo_list.len(), 2);
    }

    #[test]
    fn request_ended_clears_both_flags() {
        let state = TodoState { is_loading: true, is_saving: true, ..TodoState::default() };
        let state = reduce(&state, TodoEvent::RequestEnded);
        assert!(!state.is_loading && !state.is_saving);
    }

    #[test]
    fn edit_replaces_matching_todo_only() {
        let state = loaded(vec![todo("a", "x", false), todo("b", "y", false)]);
        let state = reduce(&state, TodoEvent::TodoEdited { edited: todo("b", "z", true), error: None });
        assert_eq!(state.todo_list, vec![todo("a", "x", false), todo("b", "z", true)]);

        let state = reduce(&state, TodoEvent::TodoEdited { edited: todo("missing", "q", false), error: Some("boom".into()) });
        assert_eq!(state.todo_list.len(), 2);
        assert_eq!(state.error_message, "boom");
    }

    #[test]
    fn complete_sets_flag() {
        let state = reduce(&loaded(vec![todo("a", "x", false)]), TodoEvent::TodoCompleted { id: TodoId("a".into()) });
        assert!(state.todo_list[0].is_completed);
    }

    #[test]
    fn revert_restores_snapshot_and_suffixes_message() {
        let original = vec![todo("a", "x", false)];
        let state = reduce(&loaded(original.clone()), TodoEvent::TodoCompleted { id: TodoId("a".into()) });
        let state = reduce(&state, TodoEvent::TodoReverted { snapshot: original.clone(), message: "Request failed: 500 Internal Server Error".into() });
        assert_eq!(state.todo_list, original);
        assert_eq!(state.error_message, format!("Request failed: 500 Internal Server Error. {REVERT_NOTICE}"));
    }

    #[test]
    fn clear_error() {
        let state = TodoState { error_message: "x".into(), ..TodoState::default() };
        assert_eq!(reduce(&state, TodoEvent::ErrorCleared).error_message, "");
    }

    #[test]
    fn store_clones_share_state() {
        let store = TodoStore::default();
        let other = store.clone();
        other.dispatch(TodoEvent::SaveStarted);
        assert!(store.snapshot().is_saving);
    }
}
