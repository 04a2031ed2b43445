//! One admin screen: table, edit panel and row menus around a single slice.

use crate::client::SliceClient;
use crate::error::SliceError;
use crate::view::form::Editable;
use crate::view::list::{ListView, TableModel, Tabular};
use crate::view::menu::RowActionMenu;
use crate::view::panel::{EditPanel, PanelError, SubmitOutcome, SubmitPolicy};

/// Screen for one resource. Owns the panel's open flag.
pub struct AdminPage<T: Tabular + Editable> {
    slice: SliceClient<T>,
    list: ListView<T>,
    panel: EditPanel<T>,
    panel_open: bool,
}

impl<T: Tabular + Editable> AdminPage<T> {
    pub fn new(slice: SliceClient<T>) -> Self {
        Self::with_policy(slice, SubmitPolicy::default())
    }

    pub fn with_policy(slice: SliceClient<T>, policy: SubmitPolicy) -> Self {
        Self {
            list: ListView::new(slice.clone()),
            panel: EditPanel::new(slice.clone()).with_policy(policy),
            slice,
            panel_open: false,
        }
    }

    pub async fn mount(&mut self) {
        self.list.mount().await;
    }

    pub fn unmount(&mut self) {
        self.list.unmount();
        self.panel_open = false;
        self.panel.sync_open(false);
    }

    /// The slice this page is bound to.
    pub fn slice(&self) -> SliceClient<T> {
        self.slice.clone()
    }

    pub fn table(&self) -> TableModel {
        self.list.table()
    }

    pub fn list(&mut self) -> &mut ListView<T> {
        &mut self.list
    }

    pub fn panel(&mut self) -> &mut EditPanel<T> {
        &mut self.panel
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// Selects `id` (or clears the selection), then flips the panel.
    pub async fn toggle(&mut self, id: Option<T::Id>) -> Result<(), SliceError> {
        self.slice.select(id).await?;
        self.panel_open = !self.panel_open;
        self.panel.sync_open(self.panel_open);
        Ok(())
    }

    /// The create trigger.
    pub async fn open_create(&mut self) -> Result<(), SliceError> {
        self.toggle(None).await
    }

    /// The per-row edit trigger.
    pub async fn open_edit(&mut self, id: T::Id) -> Result<(), SliceError> {
        self.toggle(Some(id)).await
    }

    pub fn row_menu(&self, id: T::Id) -> RowActionMenu<T::Id> {
        RowActionMenu::new(id)
    }

    /// Applies a row menu's edit choice.
    pub async fn edit_from_menu(&mut self, menu: &mut RowActionMenu<T::Id>) -> Result<(), SliceError> {
        match menu.edit() {
            Some(id) => self.open_edit(id).await,
            None => Ok(()),
        }
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome<T>, PanelError> {
        let outcome = self.panel.submit().await?;
        if outcome.closes() {
            self.panel_open = false;
            self.panel.sync_open(false);
        }
        Ok(outcome)
    }
}
