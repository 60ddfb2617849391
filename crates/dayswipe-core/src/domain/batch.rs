//! TriageBatch: the ordered, immutable task list a session runs over.

use std::ops::Index;
use std::sync::Arc;

use super::task::Task;

/// Ordered snapshot of tasks captured at session start.
///
/// Cloning is cheap (shared slice); the order never changes for the life of
/// the session. The batch does not filter: callers pass pending tasks only.
#[derive(Debug, Clone, Default)]
pub struct TriageBatch {
    tasks: Arc<[Task]>,
}

impl TriageBatch {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks: tasks.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        self.tasks.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }
}

impl From<Vec<Task>> for TriageBatch {
    fn from(tasks: Vec<Task>) -> Self {
        Self::new(tasks)
    }
}

impl Index<usize> for TriageBatch {
    type Output = Task;

    fn index(&self, position: usize) -> &Task {
        &self.tasks[position]
    }
}

impl<'a> IntoIterator for &'a TriageBatch {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
