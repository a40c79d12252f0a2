//! Shared test utilities.

pub mod github_stub;
pub mod runtime;
