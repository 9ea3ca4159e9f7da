//! Domain layer - Rules for effects, checks and targeting with no I/O
//!
//! This layer contains:
//! - Entities: character sheets, active effects, catalog definitions, world objects
//! - Value Objects: identifiers, attributes, durations, conditions
//! - Domain Services: live stats, check resolution, effect lifecycle,
//!   skill gates and targeting

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
