//! Collection names in the remote store.

pub const MEMBERS: &str = "members";
pub const TASKS: &str = "tasks";
