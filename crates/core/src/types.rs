/// Internal database primary keys are PostgreSQL BIGSERIAL. They never
/// appear on the wire; clients only see the minted reference token.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
