//! Inbound adapters driving the domain.
//!
//! - **shell**: a line-oriented terminal front end rendering each screen as
//!   plain text.

pub mod shell;
