use serde::{Deserialize, Serialize};
use store::{
    Session,
    models::{Member, Task},
};
use ts_rs::TS;

/// Pending input for a not-yet-submitted member row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct MemberDraft {
    pub name: String,
    pub role: String,
}

/// Pending input for a not-yet-submitted task row. Fields hold the raw
/// form strings; parsing happens on submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
pub struct TaskDraft {
    pub title: String,
    pub assignee: String,
    pub deadline: String,
}

#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Unauthenticated,
    Authenticated {
        session: Session,
    },
}

/// The controller's entire view of the world. Handlers receive and mutate
/// this explicitly; nothing lives in globals.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub phase: Phase,
    pub members: Vec<Member>,
    pub tasks: Vec<Task>,
    pub member_draft: MemberDraft,
    pub task_draft: TaskDraft,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, Phase::Authenticated { .. })
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            Phase::Authenticated { session } => Some(session),
            Phase::Unauthenticated => None,
        }
    }

    /// Downgrade cleanup: collections and drafts from the previous user
    /// must not survive behind the sign-in screen.
    pub(crate) fn reset(&mut self) {
        self.members.clear();
        self.tasks.clear();
        self.member_draft = MemberDraft::default();
        self.task_draft = TaskDraft::default();
    }
}
