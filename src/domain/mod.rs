pub mod gateway;
pub mod record;
pub mod todo;
