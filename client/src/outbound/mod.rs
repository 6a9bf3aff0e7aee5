//! Outbound adapters implementing domain ports.
//!
//! - **storage**: key-value backends for the session slot (in-memory and a
//!   capability-scoped directory).
//! - **mock_api**: the in-process stand-in for the remote collaborator that
//!   authenticates users and serves dashboard data.
//!
//! Adapters translate between infrastructure and domain types. They contain
//! no view or session logic.

pub mod mock_api;
pub mod storage;
