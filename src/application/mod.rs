pub mod actions;
pub mod coordinator;
pub mod debounce;
pub mod store;

mod actions_tests;
mod store_tests;
