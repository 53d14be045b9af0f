pub mod authentication;
pub mod todo;
pub mod user;
