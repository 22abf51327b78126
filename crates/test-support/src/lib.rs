//! In-memory remote-store fixture with server-equivalent semantics.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use store::{
    RemoteStore, StoreError, TaskStatus,
    models::{CreateMember, CreateTask, Member, Task},
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryStore {
    members: Mutex<Vec<Member>>,
    tasks: Mutex<Vec<Task>>,
    failures: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` operations fail the way a dead backend would.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    pub fn seed_member(&self, name: &str, role: &str) -> Member {
        let member = Member {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
        };
        self.members.lock().unwrap().push(member.clone());
        member
    }

    pub fn seed_task(&self, title: &str, assignee: Uuid, status: TaskStatus) -> Task {
        let task = Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            assignee: Some(assignee),
            status,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: Utc::now(),
        };
        self.tasks.lock().unwrap().push(task.clone());
        task
    }

    pub fn member_count(&self) -> usize {
        self.members.lock().unwrap().len()
    }

    pub fn task_count(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    fn check_failure(&self) -> Result<(), StoreError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::Api {
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn list_members(&self) -> Result<Vec<Member>, StoreError> {
        self.check_failure()?;
        Ok(self.members.lock().unwrap().clone())
    }

    async fn insert_member(&self, data: &CreateMember) -> Result<Vec<Member>, StoreError> {
        self.check_failure()?;
        let member = Member {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            role: data.role.clone(),
            created_at: Utc::now(),
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(vec![member])
    }

    async fn delete_member(&self, id: Uuid) -> Result<(), StoreError> {
        self.check_failure()?;
        self.members.lock().unwrap().retain(|member| member.id != id);
        // Foreign-key cascade, as the schema declares it.
        self.tasks
            .lock()
            .unwrap()
            .retain(|task| task.assignee != Some(id));
        Ok(())
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.check_failure()?;
        Ok(self.tasks.lock().unwrap().clone())
    }

    async fn insert_task(&self, data: &CreateTask) -> Result<Vec<Task>, StoreError> {
        self.check_failure()?;
        // Echoes whatever status the payload carried; pinning todo is the
        // caller's contract, not the store's.
        let task = Task {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            assignee: data.assignee,
            status: data.status,
            deadline: data.deadline,
            created_at: Utc::now(),
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(vec![task])
    }

    async fn update_task_status(&self, id: Uuid, status: TaskStatus) -> Result<(), StoreError> {
        self.check_failure()?;
        if let Some(task) = self
            .tasks
            .lock()
            .unwrap()
            .iter_mut()
            .find(|task| task.id == id)
        {
            task.status = status;
        }
        // A filter matching no rows is still a success, as on the wire.
        Ok(())
    }
}
