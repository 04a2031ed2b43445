//! Side panel with a validated create/edit form.
//!
//! The owner keeps the open flag and reports it through [`EditPanel::sync_open`]. Every
//! transition into the open state re-derives the form from the slice: the selected record is
//! re-located in `items` by identifier, and if it cannot be found the panel falls back to
//! create mode with empty defaults.

use crate::client::SliceClient;
use crate::entity::{entity_type, Resource};
use crate::error::SliceError;
use crate::view::form::{Editable, FieldErrors, FormValues};
use tracing::{debug, warn};

/// What the panel does when the write fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Keep the form as typed and surface the error; only a successful write closes the panel.
    #[default]
    KeepOpenOnError,
    /// Close and reset after every submit, whatever the outcome.
    AlwaysClose,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PanelError {
    #[error("Nothing changed since the form was reset")]
    Unchanged,
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(FieldErrors),
    #[error(transparent)]
    Slice(#[from] SliceError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T: Resource> {
    Created(T),
    Updated(T),
    Failed { error: SliceError, close: bool },
}

impl<T: Resource> SubmitOutcome<T> {
    /// Whether the owner should close the panel.
    pub fn closes(&self) -> bool {
        match self {
            SubmitOutcome::Created(_) | SubmitOutcome::Updated(_) => true,
            SubmitOutcome::Failed { close, .. } => *close,
        }
    }
}

pub struct EditPanel<T: Editable> {
    slice: SliceClient<T>,
    policy: SubmitPolicy,
    open: bool,
    editing: Option<T::Id>,
    baseline: FormValues,
    values: FormValues,
    last_error: Option<SliceError>,
}

impl<T: Editable> EditPanel<T> {
    pub fn new(slice: SliceClient<T>) -> Self {
        let empty = T::schema().empty_values();
        Self {
            slice,
            policy: SubmitPolicy::default(),
            open: false,
            editing: None,
            baseline: empty.clone(),
            values: empty,
            last_error: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SubmitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Identifier of the record being edited, `None` in create mode.
    pub fn editing(&self) -> Option<&T::Id> {
        self.editing.as_ref()
    }

    /// Follows the owner's open flag. Opening re-derives the form defaults; closing resets
    /// them to empty.
    pub fn sync_open(&mut self, open: bool) {
        if open == self.open {
            return;
        }
        self.open = open;
        if open {
            let state = self.slice.state();
            match state.selected_in_items() {
                Some(record) => {
                    self.editing = Some(record.id().clone());
                    self.reset_to(record.to_form());
                }
                None => {
                    self.editing = None;
                    self.reset_to(T::schema().empty_values());
                }
            }
            debug!(entity_type = entity_type::<T>(), editing = ?self.editing, "Panel opened");
        } else {
            self.editing = None;
            self.reset_to(T::schema().empty_values());
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// The form differs from its last reset.
    pub fn is_dirty(&self) -> bool {
        self.values != self.baseline
    }

    pub fn errors(&self) -> FieldErrors {
        T::schema().validate(&self.values)
    }

    pub fn can_submit(&self) -> bool {
        self.is_dirty() && self.errors().is_empty()
    }

    /// Error of the last failed write, kept while the panel stays open.
    pub fn last_error(&self) -> Option<&SliceError> {
        self.last_error.as_ref()
    }

    /// Issues `update` for the record located when the panel opened, `create` in create mode.
    ///
    /// Blocked submissions return `Err` and send nothing. Write failures come back as
    /// [`SubmitOutcome::Failed`]; the active [`SubmitPolicy`] decides whether the form is kept.
    pub async fn submit(&mut self) -> Result<SubmitOutcome<T>, PanelError> {
        if !self.is_dirty() {
            return Err(PanelError::Unchanged);
        }
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(PanelError::Invalid(errors));
        }

        let input = T::input_from_form(&self.values);
        let result = match self.editing.clone() {
            Some(id) => self.slice.update(id, input).await.map(SubmitOutcome::Updated),
            None => self.slice.create(input).await.map(SubmitOutcome::Created),
        };

        match result {
            Ok(outcome) => {
                self.last_error = None;
                self.close_and_reset();
                Ok(outcome)
            }
            Err(error) => {
                warn!(entity_type = entity_type::<T>(), error = %error, "Submit failed");
                let close = self.policy == SubmitPolicy::AlwaysClose;
                if close {
                    self.last_error = None;
                    self.close_and_reset();
                } else {
                    self.last_error = Some(error.clone());
                }
                Ok(SubmitOutcome::Failed { error, close })
            }
        }
    }

    fn close_and_reset(&mut self) {
        self.open = false;
        self.editing = None;
        self.reset_to(T::schema().empty_values());
    }

    fn reset_to(&mut self, values: FormValues) {
        self.baseline = values.clone();
        self.values = values;
    }
}
