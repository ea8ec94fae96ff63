use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
pub const EVENTS_CHANNEL_CAPACITY: usize = 256;
/// How long a stopping session waits for the reporter to flush queued reports.
pub const REPORTER_GRACE_PERIOD: Duration = Duration::from_secs(5);
