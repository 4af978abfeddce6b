//! Local fallback backend
//!
//! Emulates the remote API on top of a `KvStore`: one durable key holds the
//! whole task list as a JSON array, and every call waits a fixed latency
//! before touching it.

mod backend;
mod seed;

pub use backend::{Clock, LocalBackend};
pub use seed::demo_tasks;
