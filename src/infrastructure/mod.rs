//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory row store seeded from JSON
//! - Catalog: JSON effect/ability/skill definitions
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod catalog;
pub mod clock;
pub mod config;
pub mod dice;
pub mod http;
pub mod persistence;
pub mod state;
