//! redoubt-core: shared types, configuration, and error handling for the
//! Redoubt path-enumeration engine.
//!
//! This crate provides the foundational types used across every Redoubt
//! component:
//! - The facility data model (Node, DirectedEdge, BreachProfile, Path, ...)
//! - The target-set logic AST and Mission vocabulary
//! - Configuration management (EngineConfig)
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::EngineConfig;
pub use error::EngineError;
