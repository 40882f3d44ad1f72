//! Password reset state machine.
//!
//! `FormState` holds everything the reset screen shows and is the only
//! thing the UI mutates. Screen and submission status are derived from a
//! single phase, so a finished flow can never also be submitting.

use crate::config::LOGIN_DEEP_LINK;
use crate::error::AppError;
use crate::requests::ChangePasswordRequest;
use crate::validation::{meets_min_length, mismatch_visible, passwords_match};
use validator::Validate;

/// Which view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Success,
}

/// Handle for one accepted submit. Only the ticket issued for the current
/// generation can complete the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    generation: u64,
}

impl SubmitTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Editing,
    Submitting(SubmitTicket),
    Success,
}

/// What the form should flag next to the inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldFeedback {
    /// Primary password has content but is under the length floor.
    pub password_too_short: bool,
    /// Both fields have content and differ.
    pub mismatch: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    phase: Phase,
    password: String,
    confirm_password: String,
    generation: u64,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Editing,
            password: String::new(),
            confirm_password: String::new(),
            generation: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        match self.phase {
            Phase::Editing | Phase::Submitting(_) => Screen::Form,
            Phase::Success => Screen::Success,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting(_))
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    /// Fields only accept input while the form is idle.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Replace the primary password. Returns `false` when the edit was ignored.
    pub fn set_password(&mut self, value: impl Into<String>) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.password = value.into();
        true
    }

    /// Replace the confirmation. Returns `false` when the edit was ignored.
    pub fn set_confirm_password(&mut self, value: impl Into<String>) -> bool {
        if !self.accepts_input() {
            return false;
        }
        self.confirm_password = value.into();
        true
    }

    pub fn passwords_match(&self) -> bool {
        passwords_match(&self.password, &self.confirm_password)
    }

    pub fn meets_min_length(&self) -> bool {
        meets_min_length(&self.password)
    }

    pub fn feedback(&self) -> FieldFeedback {
        FieldFeedback {
            password_too_short: !self.password.is_empty() && !self.meets_min_length(),
            mismatch: mismatch_visible(&self.password, &self.confirm_password),
        }
    }

    /// Whether the submit trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.accepts_input() && self.passwords_match() && self.meets_min_length()
    }

    /// The request a real backend call would send for the current fields.
    pub fn to_request(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            new_password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    /// Accept a submit and enter the submitting phase.
    ///
    /// On any guard failure the state is left exactly as it was.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, AppError> {
        match self.phase {
            Phase::Success => {
                return Err(AppError::invalid_state("Password has already been updated"))
            }
            Phase::Submitting(_) => return Err(AppError::submission_in_progress()),
            Phase::Editing => {}
        }

        if !self.passwords_match() {
            return Err(AppError::passwords_do_not_match());
        }
        self.to_request().validate()?;

        self.generation += 1;
        let ticket = SubmitTicket {
            generation: self.generation,
        };
        self.phase = Phase::Submitting(ticket);
        Ok(ticket)
    }

    /// Apply a finished submission. Returns `false` for a stale or unknown ticket.
    ///
    /// Clearing the submitting flag and switching to `Success` is one
    /// assignment, so no observer sees an idle form in between.
    pub fn complete_submit(&mut self, ticket: SubmitTicket) -> bool {
        match self.phase {
            Phase::Submitting(pending)
                if pending == ticket && ticket.generation == self.generation =>
            {
                self.phase = Phase::Success;
                true
            }
            _ => false,
        }
    }

    /// Make every outstanding ticket stale. Called on teardown.
    pub fn invalidate_pending(&mut self) {
        self.generation += 1;
    }

    /// Where the redirect action should send the host, once finished.
    pub fn redirect_target(&self) -> Result<&'static str, AppError> {
        match self.screen() {
            Screen::Success => Ok(LOGIN_DEEP_LINK),
            Screen::Form => Err(AppError::invalid_state(
                "Cannot return to the app before the password is updated",
            )),
        }
    }
}
