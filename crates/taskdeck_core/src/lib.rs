pub mod db;
pub mod error;
pub mod task;

pub use db::{KvStore, MemoryKvStore, SqliteKvStore};
pub use error::{CoreError, Result};
pub use task::{CompletionPatch, Task, TaskDraft, TaskId};
