pub mod member;
pub mod task;

pub use member::{CreateMember, Member};
pub use task::{CreateTask, Task, TaskPatch};
