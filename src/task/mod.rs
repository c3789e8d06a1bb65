//! Task lifecycle management for worktrack.
//!
//! This module tracks AI-assisted coding tasks through a fixed status state
//! machine and screens new or resuming tasks for collisions with tasks
//! already running in the same environment and branch. The module follows
//! hexagonal architecture:
//!
//! - Domain types, the transition engine, and the conflict detector in
//!   [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
