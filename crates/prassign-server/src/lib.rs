//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
mod health;
mod metrics;
mod pulls;
pub mod server;
mod teams;
mod users;

pub use errors::{Result, ServerError};
