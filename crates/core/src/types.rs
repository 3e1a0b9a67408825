use uuid::Uuid;

use crate::error::CoreError;

/// Jobs are keyed by a random (v4) UUID.
pub type JobId = Uuid;

/// Generate a fresh job identifier.
pub fn new_job_id() -> JobId {
    Uuid::new_v4()
}

/// Parse a job identifier supplied by a client.
///
/// Accepts every textual UUID form (hyphenated, simple, braced, URN).
/// Anything else is a validation error.
pub fn parse_job_id(raw: &str) -> Result<JobId, CoreError> {
    Uuid::parse_str(raw).map_err(|_| CoreError::Validation("Invalid UUID format".into()))
}
