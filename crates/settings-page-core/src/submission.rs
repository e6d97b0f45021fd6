use serde::Serialize;

use crate::control::ControlKey;
use crate::tracker::{ControlSource, DirtyTracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMethod {
    Post,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "post",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEnctype {
    Multipart,
}

impl FormEnctype {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multipart => "multipart/form-data",
        }
    }
}

/// The hidden form built at submit time. `fields` lists the controls to move
/// into it, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingForm {
    pub action: String,
    pub method: FormMethod,
    pub enctype: FormEnctype,
    pub fields: Vec<ControlKey>,
}

impl OutgoingForm {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("settings form was already submitted")]
    AlreadySubmitted,
}

/// Page-lifetime state of the settings form.
#[derive(Debug, Clone, Default)]
pub struct SettingsFormState {
    tracker: DirtyTracker,
    submitted: bool,
}

impl SettingsFormState {
    pub fn new(tracker: DirtyTracker) -> Self {
        Self {
            tracker,
            submitted: false,
        }
    }

    pub fn tracker(&self) -> &DirtyTracker {
        &self.tracker
    }

    /// Whether the submit button should be enabled.
    pub fn submit_enabled(&self, source: &impl ControlSource) -> bool {
        !self.submitted && self.tracker.has_changes(source)
    }

    /// Plans the one-shot submission. Dirty controls are released from the
    /// tracker since the caller moves them out of the page.
    pub fn prepare_submission(
        &mut self,
        source: &impl ControlSource,
        action: &str,
    ) -> Result<OutgoingForm, SubmitError> {
        if self.submitted {
            return Err(SubmitError::AlreadySubmitted);
        }

        let fields = self.tracker.dirty_keys(source);
        self.tracker.release(&fields);
        self.submitted = true;

        let form = OutgoingForm {
            action: action.to_string(),
            method: FormMethod::Post,
            enctype: FormEnctype::Multipart,
            fields,
        };
        if form.is_empty() {
            tracing::debug!(action, "submitting settings form without changes");
        } else {
            tracing::debug!(action, fields = form.fields.len(), "submitting changed settings");
        }
        Ok(form)
    }

    pub fn snapshot(&self, source: &impl ControlSource, open_popups: usize) -> SettingsSnapshot {
        SettingsSnapshot {
            tracked: self.tracker.len(),
            dirty: self.tracker.dirty_keys(source),
            submit_enabled: self.submit_enabled(source),
            submitted: self.submitted,
            open_popups,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsSnapshot {
    pub tracked: usize,
    pub dirty: Vec<ControlKey>,
    pub submit_enabled: bool,
    pub submitted: bool,
    pub open_popups: usize,
}
