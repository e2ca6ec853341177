pub mod client;
pub mod error;
pub mod models;

use std::fmt;

pub use client::{ApiClient, Failure, Outcome, UserApi};
pub use error::ApiError;
pub use models::UserRecord;

/// The four operations the user resource supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// Client-side text shown when a request for this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Create => "Error creating user",
            Operation::Read => "Error fetching user",
            Operation::Update => "Error updating user",
            Operation::Delete => "Error deleting user",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}
