//! Chart-ready aggregates, all pure functions of the local collections.

use serde::Serialize;
use store::{
    TaskStatus,
    models::{Member, Task},
};
use strum_macros::Display;
use ts_rs::TS;
use uuid::Uuid;

/// Slice counts for the status pie chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
pub struct StatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.completed
    }
}

pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
    }
    counts
}

/// One bar of the per-member workload chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
pub struct MemberTaskCount {
    pub member_id: Uuid,
    pub name: String,
    pub tasks: usize,
}

/// Bars follow the member list's order; unassigned tasks count nowhere.
pub fn tasks_per_member(members: &[Member], tasks: &[Task]) -> Vec<MemberTaskCount> {
    members
        .iter()
        .map(|member| MemberTaskCount {
            member_id: member.id,
            name: member.name.clone(),
            tasks: tasks
                .iter()
                .filter(|task| task.assignee == Some(member.id))
                .count(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS, Display)]
pub enum ProjectStatus {
    #[serde(rename = "On Track")]
    #[strum(serialize = "On Track")]
    OnTrack,
    #[serde(rename = "At Risk")]
    #[strum(serialize = "At Risk")]
    AtRisk,
    Delayed,
}

/// Completion-ratio tiers: >=80% on track, >=50% at risk, else delayed.
/// An empty board reads as ratio 0.
pub fn project_status(tasks: &[Task]) -> ProjectStatus {
    let counts = status_counts(tasks);
    let total = counts.total();
    let ratio = if total == 0 {
        0.0
    } else {
        counts.completed as f64 / total as f64
    };
    if ratio >= 0.8 {
        ProjectStatus::OnTrack
    } else if ratio >= 0.5 {
        ProjectStatus::AtRisk
    } else {
        ProjectStatus::Delayed
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use store::{
        TaskStatus,
        models::{Member, Task},
    };
    use uuid::Uuid;

    use super::{ProjectStatus, project_status, status_counts, tasks_per_member};

    fn task(assignee: Option<Uuid>, status: TaskStatus) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            assignee,
            status,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn member(name: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role: "Developer".to_string(),
            created_at: Utc::now(),
        }
    }

    fn board(todo: usize, in_progress: usize, completed: usize) -> Vec<Task> {
        let mut tasks = Vec::new();
        tasks.extend((0..todo).map(|_| task(None, TaskStatus::Todo)));
        tasks.extend((0..in_progress).map(|_| task(None, TaskStatus::InProgress)));
        tasks.extend((0..completed).map(|_| task(None, TaskStatus::Completed)));
        tasks
    }

    #[test]
    fn counts_sum_to_the_task_total() {
        let tasks = board(3, 2, 5);
        let counts = status_counts(&tasks);
        assert_eq!(counts.todo, 3);
        assert_eq!(counts.in_progress, 2);
        assert_eq!(counts.completed, 5);
        assert_eq!(counts.total(), tasks.len());
    }

    #[test]
    fn per_member_counts_follow_assignee_only() {
        let ann = member("Ann");
        let ben = member("Ben");
        let tasks = vec![
            task(Some(ann.id), TaskStatus::Todo),
            task(Some(ann.id), TaskStatus::Completed),
            task(None, TaskStatus::Todo),
        ];

        let bars = tasks_per_member(&[ann.clone(), ben.clone()], &tasks);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].name, "Ann");
        assert_eq!(bars[0].tasks, 2);
        assert_eq!(bars[1].member_id, ben.id);
        assert_eq!(bars[1].tasks, 0);
    }

    #[test]
    fn classification_tiers_match_the_completion_ratio() {
        // 4 of 4 complete.
        assert_eq!(project_status(&board(0, 0, 4)), ProjectStatus::OnTrack);
        // 2 of 4.
        assert_eq!(project_status(&board(1, 1, 2)), ProjectStatus::AtRisk);
        // 1 of 4.
        assert_eq!(project_status(&board(2, 1, 1)), ProjectStatus::Delayed);
        // Ratio 0.6 sits in the at-risk band, 0.3 below it.
        assert_eq!(project_status(&board(2, 0, 3)), ProjectStatus::AtRisk);
        assert_eq!(project_status(&board(7, 0, 3)), ProjectStatus::Delayed);
        // Exactly 80% is on track.
        assert_eq!(project_status(&board(1, 0, 4)), ProjectStatus::OnTrack);
    }

    #[test]
    fn empty_board_reads_as_delayed() {
        assert_eq!(project_status(&[]), ProjectStatus::Delayed);
    }

    #[test]
    fn labels_render_with_spaces() {
        assert_eq!(ProjectStatus::OnTrack.to_string(), "On Track");
        assert_eq!(ProjectStatus::AtRisk.to_string(), "At Risk");
        assert_eq!(ProjectStatus::Delayed.to_string(), "Delayed");
    }
}
