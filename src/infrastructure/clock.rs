//! System clock adapter

use chrono::{DateTime, Utc};

use crate::application::ports::outbound::ClockPort;

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
