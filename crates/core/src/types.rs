/// Document identifiers are opaque strings assigned by the document store.
pub type DocumentId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
