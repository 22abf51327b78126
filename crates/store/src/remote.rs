use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    StoreError,
    models::{CreateMember, CreateTask, Member, Task},
    types::TaskStatus,
};

/// The remote-table operations the client issues, one request each.
///
/// [`HttpStore`](crate::HttpStore) implements this against the hosted
/// backend; tests substitute an in-memory implementation.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, StoreError>;

    async fn insert_member(&self, data: &CreateMember) -> Result<Vec<Member>, StoreError>;

    async fn delete_member(&self, id: Uuid) -> Result<(), StoreError>;

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    async fn insert_task(&self, data: &CreateTask) -> Result<Vec<Task>, StoreError>;

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> Result<(), StoreError>;
}
