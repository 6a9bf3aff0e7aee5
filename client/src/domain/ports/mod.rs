//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports describe what the client core needs from the outside: a
//! key-value slot for the session and the remote collaborator that
//! authenticates users and serves dashboard data. Adapters live in
//! `crate::outbound`; tests substitute the generated mocks.

mod auth_gateway;
mod candidates_query;
mod challenges_query;
mod key_value_store;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::AuthGateway;
#[cfg(test)]
pub use candidates_query::MockCandidatesQuery;
pub use candidates_query::CandidatesQuery;
#[cfg(test)]
pub use challenges_query::MockChallengesQuery;
pub use challenges_query::ChallengesQuery;
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
pub use key_value_store::KeyValueStore;
