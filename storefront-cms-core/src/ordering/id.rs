//! Record id generation

/// Collision-resistant record id: hex millisecond timestamp plus a random UUID v4
///
/// The timestamp prefix keeps ids roughly creation-ordered when eyeballing stored JSON;
/// uniqueness comes from the UUID.
#[must_use]
pub fn new_record_id() -> String {
    format!(
        "{:x}-{}",
        chrono::Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4().simple()
    )
}
