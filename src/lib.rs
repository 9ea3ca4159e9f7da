//! RP Bridge Engine - effects, checks and action resolution for role-play game clients
//!
//! Game clients call the HTTP API to activate abilities and interact with
//! world objects. The engine tracks temporary effects on each character,
//! resolves dice checks and moves world objects through their action states.

pub mod application;
pub mod domain;
pub mod infrastructure;
