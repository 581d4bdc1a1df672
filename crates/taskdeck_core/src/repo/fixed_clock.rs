//! Pinned clock for deterministic id assignment in unit tests.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

pub(crate) struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.0).unwrap()
    }
}
