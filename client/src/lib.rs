//! Echelon client core.
//!
//! Session persistence, the view state machine, role-specific dashboard
//! presenters, and the adapters that let them run as a terminal application.
//! Everything outside [`domain`] is an adapter plugged in through
//! [`domain::ports`].

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(test)]
mod test_support;
