//! Shared test utilities for airlog integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Fixtures are static strings; the fake model servers
//! bind 127.0.0.1:0 so harnesses can run in parallel.

pub mod assertions;
pub mod builders;
pub mod fake_vision_api;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
