/// Store primary keys are SQLite `INTEGER PRIMARY KEY` rowids.
pub type DbId = i64;

/// All persisted timestamps are UTC milliseconds since the Unix epoch.
pub type EpochMillis = i64;

/// Current UTC time in epoch milliseconds.
pub fn now_millis() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}
