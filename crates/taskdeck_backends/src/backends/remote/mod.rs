//! Remote REST backend
//!
//! Talks to the task API over JSON:
//! `GET/POST {base}/todos`, `PUT/DELETE {base}/todos/{id}`,
//! `PATCH {base}/todos/{id}/complete`.

mod backend;
mod types;

pub use backend::RemoteBackend;
pub use types::RemoteConfig;
