use chrono::{DateTime, Utc};

/// Time source used to default `as_of` when a caller does not pin it
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant, for deterministic tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Format timestamp as ISO 8601 UTC for API responses
pub fn format_iso8601(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339()
}
