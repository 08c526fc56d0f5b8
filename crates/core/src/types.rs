/// Interview identifiers are opaque strings (UUID v4 in practice).
pub type InterviewId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh, unique interview identifier.
pub fn new_interview_id() -> InterviewId {
    uuid::Uuid::new_v4().to_string()
}
