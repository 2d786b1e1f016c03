/// All database primary keys except generation-log ids are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Generation-log ids are opaque UUIDv7 correlation tokens.
pub type LogId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
