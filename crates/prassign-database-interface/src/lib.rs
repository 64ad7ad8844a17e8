mod errors;
mod interface;

pub use errors::{DatabaseError, Result};
pub use interface::{check_reviewers, DbService};
#[cfg(any(test, feature = "testkit"))]
pub use interface::MockDbService;
