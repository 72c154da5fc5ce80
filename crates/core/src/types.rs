/// Production record ids come from a persisted monotonic counter.
pub type RecordId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
