//! Per-row action menu with delete confirmation.

use crate::client::SliceClient;
use crate::entity::Resource;
use crate::error::SliceError;

pub const DELETE_BUTTON: &str = "Eliminar";
pub const CANCEL_BUTTON: &str = "Cancelar";
pub const EDIT_OPTION: &str = "Editar";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    MenuOpen,
    ConfirmDelete,
}

/// Text of the delete confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub body: &'static str,
    pub confirm: &'static str,
    pub cancel: &'static str,
}

/// Menu for a single row. At most one of menu or dialog is open at a time.
#[derive(Debug, Clone)]
pub struct RowActionMenu<Id> {
    id: Id,
    state: MenuState,
}

impl<Id: Clone> RowActionMenu<Id> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            state: MenuState::Closed,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn open(&mut self) {
        self.state = MenuState::MenuOpen;
    }

    /// Labels of the open menu's entries, empty while closed or confirming.
    pub fn options(&self) -> &'static [&'static str] {
        match self.state {
            MenuState::MenuOpen => &[EDIT_OPTION, DELETE_BUTTON],
            MenuState::Closed | MenuState::ConfirmDelete => &[],
        }
    }

    /// Closes the menu or dialog without side effects.
    pub fn cancel(&mut self) {
        self.state = MenuState::Closed;
    }

    /// Picks "edit": closes the menu and hands back the row id for the owner's toggle.
    pub fn edit(&mut self) -> Option<Id> {
        if self.state != MenuState::MenuOpen {
            return None;
        }
        self.state = MenuState::Closed;
        Some(self.id.clone())
    }

    /// Picks "delete": swaps the menu for the confirmation dialog.
    pub fn request_delete(&mut self) -> bool {
        if self.state != MenuState::MenuOpen {
            return false;
        }
        self.state = MenuState::ConfirmDelete;
        true
    }

    pub fn dialog<T: Resource>(&self) -> Option<ConfirmDialog> {
        (self.state == MenuState::ConfirmDelete).then(|| ConfirmDialog {
            title: format!("Eliminar {}", T::LABEL),
            body: "El registro seleccionado será eliminado permanentemente",
            confirm: DELETE_BUTTON,
            cancel: CANCEL_BUTTON,
        })
    }

    /// Confirms the dialog: issues the delete and closes, whatever the outcome.
    ///
    /// Returns `Ok(false)` without touching the slice when no dialog is open.
    pub async fn confirm<T>(&mut self, slice: &SliceClient<T>) -> Result<bool, SliceError>
    where
        T: Resource<Id = Id>,
    {
        if self.state != MenuState::ConfirmDelete {
            return Ok(false);
        }
        self.state = MenuState::Closed;
        slice.delete(self.id.clone()).await.map(|()| true)
    }
}
