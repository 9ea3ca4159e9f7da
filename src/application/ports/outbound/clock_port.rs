//! Clock port

use chrono::{DateTime, Utc};

/// Injected wall clock for cooldowns and effect provenance
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
