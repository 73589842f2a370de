// --- File: crates/bookify_twilio/src/phone.rs ---
//! Phone number normalization.

/// Normalize a phone number to a messaging destination with a leading `+`.
///
/// Numbers already carrying the prefix are returned unchanged; anything else
/// gets the `+` prepended. No further validation is applied.
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    if trimmed.starts_with('+') {
        trimmed.to_string()
    } else {
        format!("+{trimmed}")
    }
}
