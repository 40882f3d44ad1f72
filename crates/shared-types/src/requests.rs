use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload a password change would carry to the account service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords don't match!"))]
    pub confirm_password: String,
}
