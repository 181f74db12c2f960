//! Section navigation state machine.
//!
//! The cursor points at the section on screen. Moving forward needs a
//! passing [`SectionReport`] for the current section; moving back needs
//! nothing. Submitting is only possible from the last section.
//!
//! ```text
//!            next (valid)              next (valid)
//!   [0] ───────────────────► [1] ─ ─ ─ ─ ─ ─ ─ ─ ─► [n-1] ── submit (valid) ──► sink
//!    ▲                        │                       │
//!    └──────── prev ──────────┘◄──────── prev ────────┘
//! ```

use serde::Serialize;

use crate::error::DomainError;
use crate::validation::SectionReport;

/// Which navigation controls are currently usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NavigationActions {
    pub prev: bool,
    pub next: bool,
    pub submit: bool,
}

/// Index of the active section within `[0, section_count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionCursor {
    current: usize,
    section_count: usize,
}

impl SectionCursor {
    /// Start at the first section.
    pub fn new(section_count: usize) -> Result<Self, DomainError> {
        if section_count == 0 {
            return Err(DomainError::validation("Cannot navigate a form without sections"));
        }
        Ok(Self {
            current: 0,
            section_count,
        })
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.section_count
    }

    pub fn actions(&self) -> NavigationActions {
        NavigationActions {
            prev: !self.is_first(),
            next: !self.is_last(),
            submit: self.is_last(),
        }
    }

    /// Move to the next section if `report` (for the current section) passes.
    ///
    /// Returns `Ok(false)` and stays put when the report has errors.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidStateTransition` on the last section, where the
    /// only way forward is submit.
    pub fn advance(&mut self, report: &SectionReport) -> Result<bool, DomainError> {
        if self.is_last() {
            return Err(DomainError::invalid_state_transition(
                "Already on the last section; submit instead",
            ));
        }
        if !report.is_valid() {
            return Ok(false);
        }
        self.current += 1;
        Ok(true)
    }

    /// Move to the previous section, regardless of validity.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidStateTransition` on the first section.
    pub fn retreat(&mut self) -> Result<(), DomainError> {
        if self.is_first() {
            return Err(DomainError::invalid_state_transition(
                "Already on the first section",
            ));
        }
        self.current -= 1;
        Ok(())
    }

    /// Whether a submit with `report` (for the last section) may go ahead.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidStateTransition` when not on the last section.
    pub fn can_submit(&self, report: &SectionReport) -> Result<bool, DomainError> {
        if !self.is_last() {
            return Err(DomainError::invalid_state_transition(
                "Submit is only available on the last section",
            ));
        }
        Ok(report.is_valid())
    }
}
