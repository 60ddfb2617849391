//! Domain model (IDs, tasks, batches, decisions, session state, summary).

pub mod batch;
pub mod decision;
pub mod errors;
pub mod ids;
pub mod state;
pub mod summary;
pub mod task;

pub use batch::TriageBatch;
pub use decision::Decision;
pub use errors::{ConfigError, ErrorKind, StoreError, TaskError};
pub use ids::{SessionId, TaskId, UserId};
pub use state::{Advance, Commit, SessionPhase, SessionState};
pub use summary::{CompletionTier, SessionSummary, SummaryEntry};
pub use task::{Task, TaskPatch, TaskTitle, pending_tasks};
