/// Record identifiers are plain integers; they only need to be unique within
/// a single list.
pub type RecordId = i64;

/// Monetary amounts are stored as integer cents.
pub type Cents = i64;
