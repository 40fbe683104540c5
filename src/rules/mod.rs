//! The rule engine: action validation and application.
//!
//! [`GameState::step`](crate::core::GameState::step) lives in
//! [`resolver`]; [`InvalidAction`] is the single rule-violation error.

pub mod error;
pub mod resolver;

pub use error::InvalidAction;
