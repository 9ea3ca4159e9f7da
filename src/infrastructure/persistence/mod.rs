//! Persistence adapters
//!
//! The engine only needs row-level get/save/lock, so the bundled adapter
//! keeps everything in memory and seeds it from a JSON file at startup.

mod in_memory;

pub use in_memory::{GroupMembership, InMemoryStore, SeedData};
