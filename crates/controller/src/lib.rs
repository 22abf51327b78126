use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use store::{
    RemoteStore, Session, TaskStatus,
    models::{CreateMember, CreateTask},
};
use tokio::sync::watch;
use uuid::Uuid;

pub mod aggregates;
mod notify;
mod state;

pub use notify::{Notification, NotificationLevel, Notifier};
pub use state::{AppState, MemberDraft, Phase, TaskDraft};

/// Client state controller.
///
/// Every remote call is fire-and-await from the calling event handler:
/// nothing is mutated before the response returns, so a failed call needs
/// no rollback. There is deliberately no in-flight guard; a response that
/// lands after sign-out only finds state that has already been reset.
pub struct AppController<S> {
    store: Arc<S>,
    state: AppState,
    notifier: Notifier,
}

impl<S: RemoteStore> AppController<S> {
    pub fn new(store: Arc<S>, notifier: Notifier) -> Self {
        Self {
            store,
            state: AppState::default(),
            notifier,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Feed session transitions from the auth watch channel until the
    /// sender goes away.
    pub async fn drive_sessions(&mut self, mut sessions: watch::Receiver<Option<Session>>) {
        loop {
            let session = sessions.borrow_and_update().clone();
            self.handle_session_change(session).await;
            if sessions.changed().await.is_err() {
                break;
            }
        }
    }

    /// Phase transition. Entering the authenticated phase fetches both
    /// collections once; leaving it discards them.
    pub async fn handle_session_change(&mut self, session: Option<Session>) {
        match session {
            Some(session) if !session.is_expired(Utc::now()) => {
                let entering = !self.state.is_authenticated();
                self.state.phase = Phase::Authenticated { session };
                if entering {
                    self.refresh_members().await;
                    self.refresh_tasks().await;
                }
            }
            _ => {
                if self.state.is_authenticated() {
                    tracing::debug!("Session gone, discarding local collections");
                    self.notifier.info("Signed out");
                }
                self.state.phase = Phase::Unauthenticated;
                self.state.reset();
            }
        }
    }

    pub async fn refresh_members(&mut self) {
        match self.store.list_members().await {
            Ok(members) => self.state.members = members,
            Err(err) => {
                tracing::warn!("Failed to fetch members: {err}");
                self.notifier.error("Failed to load members");
            }
        }
    }

    pub async fn refresh_tasks(&mut self) {
        match self.store.list_tasks().await {
            Ok(tasks) => self.state.tasks = tasks,
            Err(err) => {
                tracing::warn!("Failed to fetch tasks: {err}");
                self.notifier.error("Failed to load tasks");
            }
        }
    }

    /// Submit the member draft. Empty name or role never reaches the wire.
    pub async fn add_member(&mut self) {
        let name = self.state.member_draft.name.trim().to_string();
        let role = self.state.member_draft.role.trim().to_string();
        if name.is_empty() || role.is_empty() {
            self.notifier.error("Name and role are required");
            return;
        }

        let data = CreateMember { name, role };
        match self.store.insert_member(&data).await {
            Ok(inserted) => {
                tracing::debug!(count = inserted.len(), "Inserted member rows");
                self.state.members.extend(inserted);
                self.state.member_draft = MemberDraft::default();
            }
            Err(err) => {
                tracing::warn!("Failed to add member: {err}");
                self.notifier.error("Failed to add member");
            }
        }
    }

    /// Submit the task draft. Status is pinned to todo whatever the form
    /// carried; a malformed assignee id or deadline never reaches the wire.
    pub async fn add_task(&mut self) {
        let draft = self.state.task_draft.clone();
        let title = draft.title.trim().to_string();
        if title.is_empty() || draft.assignee.trim().is_empty() || draft.deadline.trim().is_empty()
        {
            self.notifier.error("Title, assignee and deadline are required");
            return;
        }
        let Ok(assignee) = draft.assignee.trim().parse::<Uuid>() else {
            self.notifier.error("Assignee is not a valid member id");
            return;
        };
        let Ok(deadline) = draft.deadline.trim().parse::<NaiveDate>() else {
            self.notifier.error("Deadline is not a valid date");
            return;
        };

        let data = CreateTask::new(title, assignee, deadline);
        match self.store.insert_task(&data).await {
            Ok(inserted) => {
                tracing::debug!(count = inserted.len(), "Inserted task rows");
                self.state.tasks.extend(inserted);
                self.state.task_draft = TaskDraft::default();
            }
            Err(err) => {
                tracing::warn!("Failed to add task: {err}");
                self.notifier.error("Failed to add task");
            }
        }
    }

    /// Targeted status update. An identifier with no local match leaves
    /// the list unchanged.
    pub async fn set_task_status(&mut self, task_id: Uuid, status: TaskStatus) {
        match self.store.update_task_status(task_id, status).await {
            Ok(()) => {
                if let Some(task) = self.state.tasks.iter_mut().find(|task| task.id == task_id) {
                    task.status = status;
                }
            }
            Err(err) => {
                tracing::warn!(%task_id, "Failed to update task status: {err}");
                self.notifier.error("Failed to update task");
            }
        }
    }

    /// Delete a member. The server cascades its tasks; a refetch brings
    /// the local task list back in line.
    pub async fn remove_member(&mut self, member_id: Uuid) {
        match self.store.delete_member(member_id).await {
            Ok(()) => {
                self.state.members.retain(|member| member.id != member_id);
                self.refresh_tasks().await;
            }
            Err(err) => {
                tracing::warn!(%member_id, "Failed to delete member: {err}");
                self.notifier.error("Failed to delete member");
            }
        }
    }
}
