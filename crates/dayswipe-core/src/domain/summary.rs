//! Completion summary shown after a session ends.

use serde::{Deserialize, Serialize};

use super::batch::TriageBatch;
use super::decision::Decision;
use super::ids::TaskId;

/// Motivation tier picked from the completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionTier {
    Perfect,
    Amazing,
    Great,
    Good,
    NiceStart,
    JustStarted,
}

impl CompletionTier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            100.. => CompletionTier::Perfect,
            80..=99 => CompletionTier::Amazing,
            60..=79 => CompletionTier::Great,
            40..=59 => CompletionTier::Good,
            20..=39 => CompletionTier::NiceStart,
            _ => CompletionTier::JustStarted,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            CompletionTier::Perfect => "Perfect! You crushed it!",
            CompletionTier::Amazing => "Amazing work! Keep it up!",
            CompletionTier::Great => "Great job! You are doing well!",
            CompletionTier::Good => "Good effort! Keep going!",
            CompletionTier::NiceStart => "Nice start! Tomorrow is a new day!",
            CompletionTier::JustStarted => "Every journey starts somewhere!",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            CompletionTier::Perfect => "🏆",
            CompletionTier::Amazing => "😎",
            CompletionTier::Great => "🙌",
            CompletionTier::Good => "👍",
            CompletionTier::NiceStart => "💪",
            CompletionTier::JustStarted => "🌟",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub task_id: TaskId,
    pub title: String,
    pub done: bool,
}

/// Aggregated result of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
    /// Rounded to the nearest whole percent; 0 for an empty session.
    pub percentage: u8,
    pub tier: CompletionTier,
    pub entries: Vec<SummaryEntry>,
}

impl SessionSummary {
    /// Build the summary from the batch and the decisions it produced.
    ///
    /// Decisions are matched to batch tasks by id; a task with no decision
    /// counts as not done.
    pub fn new(batch: &TriageBatch, decisions: &[Decision]) -> Self {
        let entries: Vec<SummaryEntry> = batch
            .iter()
            .map(|task| SummaryEntry {
                task_id: task.id,
                title: task.title.to_string(),
                done: decisions
                    .iter()
                    .find(|d| d.task_id == task.id)
                    .is_some_and(|d| d.outcome),
            })
            .collect();

        let total = entries.len();
        let completed = entries.iter().filter(|e| e.done).count();
        let percentage = if total == 0 {
            0
        } else {
            ((completed as f64 / total as f64) * 100.0).round() as u8
        };

        Self {
            total,
            completed,
            remaining: total - completed,
            percentage,
            tier: CompletionTier::from_percentage(percentage),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::UserId;
    use crate::domain::task::{Task, TaskTitle};
    use chrono::Utc;
    use rstest::rstest;

    fn batch(n: u64) -> TriageBatch {
        let now = Utc::now();
        (1..=n)
            .map(|id| {
                Task::new(
                    TaskId::new(id),
                    UserId::new(1),
                    TaskTitle::new(format!("t{id}")).unwrap(),
                    now,
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[rstest]
    #[case::perfect(100, CompletionTier::Perfect)]
    #[case::amazing_low_edge(80, CompletionTier::Amazing)]
    #[case::great(79, CompletionTier::Great)]
    #[case::good(40, CompletionTier::Good)]
    #[case::nice_start(20, CompletionTier::NiceStart)]
    #[case::just_started(19, CompletionTier::JustStarted)]
    #[case::zero(0, CompletionTier::JustStarted)]
    fn tiers_follow_percentage(#[case] percentage: u8, #[case] expected: CompletionTier) {
        assert_eq!(CompletionTier::from_percentage(percentage), expected);
    }

    #[test]
    fn summary_counts_and_rounds() {
        let b = batch(3);
        let decisions = vec![
            Decision::done(TaskId::new(1)),
            Decision::not_done(TaskId::new(2)),
            Decision::done(TaskId::new(3)),
        ];
        let summary = SessionSummary::new(&b, &decisions);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 2);
        assert_eq!(summary.remaining, 1);
        assert_eq!(summary.percentage, 67);
        assert_eq!(summary.tier, CompletionTier::Great);
        assert_eq!(summary.entries[1].title, "t2");
        assert!(!summary.entries[1].done);
    }

    #[test]
    fn empty_summary_is_zero_percent() {
        let summary = SessionSummary::new(&TriageBatch::default(), &[]);
        assert_eq!(summary.percentage, 0);
        assert_eq!(summary.tier, CompletionTier::JustStarted);
        assert!(summary.entries.is_empty());
    }
}
