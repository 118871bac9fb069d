//! Shipspec Core
//!
//! Typed definitions for build plans, deployment projects, and permission
//! sets as the orchestration server stores them.
//!
//! This crate contains:
//! - Domain types: plans, stages, jobs, tasks, artifacts, deployments,
//!   environments, permission grants
//! - Identity newtypes (`Key`, `Oid`) validated at construction
//!
//! Everything here is pure data: no I/O happens in this crate. Definitions
//! serialize straight to the wire shapes the server expects.

pub mod domain;
pub mod error;
pub mod ident;

pub use error::ValidationError;
pub use ident::{Key, Oid};
