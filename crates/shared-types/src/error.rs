use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Categorization of reset-flow errors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppErrorKind {
    PasswordsDoNotMatch,
    ValidationError,
    SubmissionInProgress,
    InvalidState,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::PasswordsDoNotMatch => write!(f, "PasswordsDoNotMatch"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::SubmissionInProgress => write!(f, "SubmissionInProgress"),
            AppErrorKind::InvalidState => write!(f, "InvalidState"),
        }
    }
}

/// Structured error reported synchronously by reset-flow actions.
///
/// None of these are transient: the action that produced one left the
/// form untouched and there is nothing to retry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl AppError {
    pub fn passwords_do_not_match() -> Self {
        Self {
            kind: AppErrorKind::PasswordsDoNotMatch,
            message: "Passwords don't match!".to_string(),
            field_errors: HashMap::new(),
        }
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: AppErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    pub fn submission_in_progress() -> Self {
        Self {
            kind: AppErrorKind::SubmissionInProgress,
            message: "A password change is already in progress".to_string(),
            field_errors: HashMap::new(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self {
            kind: AppErrorKind::InvalidState,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    /// Message suitable for showing to the user.
    ///
    /// Validation failures prefer the first field message over the generic
    /// summary so the user sees what to fix.
    pub fn friendly_message(&self) -> String {
        if self.kind == AppErrorKind::ValidationError {
            let mut fields: Vec<_> = self.field_errors.iter().collect();
            fields.sort();
            if let Some((_, msg)) = fields.first() {
                return msg.to_string();
            }
        }
        self.message.clone()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut field_errors = HashMap::new();
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let msg = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                field_errors.insert(field.to_string(), msg);
            }
        }
        AppError::validation("Validation failed", field_errors)
    }
}
