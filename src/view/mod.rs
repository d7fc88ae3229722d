pub mod listing;
pub mod route;
