//! Step definitions for task state transition behaviour tests.

pub mod given;
pub mod then;
pub mod when;
