//! Decision model: the per-task result of a triage session.

use serde::{Deserialize, Serialize};

use super::ids::TaskId;

/// One triage decision: was the task done today?
///
/// A session produces exactly one `Decision` per batch task, in batch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
    pub task_id: TaskId,
    pub outcome: bool,
}

impl Decision {
    pub fn new(task_id: TaskId, outcome: bool) -> Self {
        Self { task_id, outcome }
    }

    pub fn done(task_id: TaskId) -> Self {
        Self::new(task_id, true)
    }

    pub fn not_done(task_id: TaskId) -> Self {
        Self::new(task_id, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decision_wire_shape() {
        let value = serde_json::to_value(Decision::done(TaskId::new(1))).unwrap();
        assert_eq!(value, json!({ "taskId": 1, "outcome": true }));
    }
}
