/// Raw sensor reading. Sources only ever carry non-negative integers.
pub type Reading = u32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
