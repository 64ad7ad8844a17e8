pub mod pulls;
pub mod teams;
pub mod users;
