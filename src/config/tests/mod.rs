//! Unit tests for configuration loading and validation.
//!
//! Tests are organised into modules by functional area:
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `field_resolution`: Token, event path, and PR URL resolution tests
//! - `settings`: `RunSettings` validation tests

mod helpers;
mod precedence;
