//! Worktrack: lifecycle tracking for AI-assisted coding tasks.
//!
//! This crate tracks coding tasks that execute on the local machine, in a git
//! worktree, or on a remote host. It validates task status changes against a
//! fixed state machine and detects when a new task would run concurrently
//! with another task in the same environment and branch.
//!
//! # Architecture
//!
//! Worktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports
//!
//! # Modules
//!
//! - [`task`]: Status transitions, environment identity, and conflict
//!   detection

pub mod task;
