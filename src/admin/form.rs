//! Shared submission state machine for the per-entity admin forms.
//!
//! Every form follows the same lifecycle regardless of entity kind:
//! editing a local draft, a synchronous validation pass on submit, one
//! in-flight request at a time, and on failure the draft survives with the
//! error attached.

use std::collections::HashMap;

use super::draft::EntityDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Draft is editable; may carry field errors from a blocked submit
    Editing,
    /// Request in flight; draft is frozen and further submits are rejected
    Submitting,
    /// Form dismissed; control returns to the list view
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed or a submit is already in flight
    Blocked,
    /// Draft is valid; the caller should start the network request
    Started,
}

#[derive(Debug)]
pub struct FormMachine {
    draft: EntityDraft,
    phase: FormPhase,
    field_errors: HashMap<String, String>,
    submit_error: Option<String>,
}

impl FormMachine {
    /// Open the form with a draft (empty for create, populated for edit)
    pub fn open(draft: EntityDraft) -> Self {
        Self {
            draft,
            phase: FormPhase::Editing,
            field_errors: HashMap::new(),
            submit_error: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn draft(&self) -> &EntityDraft {
        &self.draft
    }

    /// Mutable draft access while editing; frozen once a submit is in flight
    pub fn draft_mut(&mut self) -> Option<&mut EntityDraft> {
        match self.phase {
            FormPhase::Editing => Some(&mut self.draft),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> &HashMap<String, String> {
        &self.field_errors
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Attempt to submit the draft. Runs validation synchronously; a failed
    /// check blocks the submit with per-field messages and makes no request.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self.phase {
            FormPhase::Editing => {}
            // In flight or already closed: nothing to start
            _ => return SubmitOutcome::Blocked,
        }

        match self.draft.validate() {
            Ok(()) => {
                self.field_errors.clear();
                self.submit_error = None;
                self.phase = FormPhase::Submitting;
                SubmitOutcome::Started
            }
            Err(err) => {
                self.field_errors = err.field_errors;
                SubmitOutcome::Blocked
            }
        }
    }

    /// The in-flight request succeeded; the form closes.
    pub fn resolve_success(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Closed;
        }
    }

    /// The in-flight request failed; the draft survives with the error.
    pub fn resolve_failure(&mut self, message: impl Into<String>) {
        if self.phase == FormPhase::Submitting {
            self.submit_error = Some(message.into());
            self.phase = FormPhase::Editing;
        }
    }

    /// Discard the draft unconditionally and return to the list view.
    pub fn cancel(&mut self) {
        self.phase = FormPhase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::CreateTeamMember;

    fn valid_draft() -> EntityDraft {
        EntityDraft::TeamMember(CreateTeamMember {
            name: "Ada Okoye".to_string(),
            role: "Principal Architect".to_string(),
            bio: String::new(),
            image_url: String::new(),
        })
    }

    fn invalid_draft() -> EntityDraft {
        EntityDraft::TeamMember(CreateTeamMember {
            name: String::new(),
            role: String::new(),
            bio: String::new(),
            image_url: String::new(),
        })
    }

    #[test]
    fn invalid_submit_is_blocked_with_field_errors() {
        let mut form = FormMachine::open(invalid_draft());
        assert_eq!(form.submit(), SubmitOutcome::Blocked);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.field_errors().len(), 2);
    }

    #[test]
    fn valid_submit_starts_and_success_closes() {
        let mut form = FormMachine::open(valid_draft());
        assert_eq!(form.submit(), SubmitOutcome::Started);
        assert_eq!(form.phase(), FormPhase::Submitting);

        form.resolve_success();
        assert_eq!(form.phase(), FormPhase::Closed);
    }

    #[test]
    fn no_double_submit_while_in_flight() {
        let mut form = FormMachine::open(valid_draft());
        assert_eq!(form.submit(), SubmitOutcome::Started);
        assert_eq!(form.submit(), SubmitOutcome::Blocked);
        assert!(form.draft_mut().is_none());
    }

    #[test]
    fn failure_keeps_draft_and_records_error() {
        let mut form = FormMachine::open(valid_draft());
        form.submit();
        form.resolve_failure("Database error occurred");

        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.submit_error(), Some("Database error occurred"));
        // Draft is editable again and can be resubmitted
        assert!(form.draft_mut().is_some());
        assert_eq!(form.submit(), SubmitOutcome::Started);
    }

    #[test]
    fn fixing_errors_clears_them_on_next_submit() {
        let mut form = FormMachine::open(invalid_draft());
        form.submit();
        assert!(!form.field_errors().is_empty());

        if let Some(EntityDraft::TeamMember(draft)) = form.draft_mut() {
            draft.name = "Ada Okoye".to_string();
            draft.role = "Principal Architect".to_string();
        }
        assert_eq!(form.submit(), SubmitOutcome::Started);
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn cancel_discards_unconditionally() {
        let mut form = FormMachine::open(valid_draft());
        form.cancel();
        assert_eq!(form.phase(), FormPhase::Closed);
        assert_eq!(form.submit(), SubmitOutcome::Blocked);
    }
}
