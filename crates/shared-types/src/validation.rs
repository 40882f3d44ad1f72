//! Password rules shared by the live form feedback and the submit guard.

/// Minimum number of characters accepted for a new password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Both entries are non-empty and identical.
pub fn passwords_match(password: &str, confirm: &str) -> bool {
    !password.is_empty() && password == confirm
}

/// Length is counted in characters, not bytes.
pub fn meets_min_length(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Whether the inline mismatch warning should be shown.
///
/// Stays quiet until the user has typed into both fields.
pub fn mismatch_visible(password: &str, confirm: &str) -> bool {
    !password.is_empty() && !confirm.is_empty() && password != confirm
}
