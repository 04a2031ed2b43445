//! # Slice State
//!
//! The snapshot a slice publishes after every change.
//!
//! - `items` is the full collection from the most recent applied fetch-all, in server order.
//!   It is replaced wholesale and never patched in place.
//! - `selected` is the record targeted for editing, or `None` for create mode.
//! - `status` tracks the fetch machine `Idle → Loading → {Loaded, Failed}`; `selected` is
//!   orthogonal to it.

use crate::entity::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SliceState<T: Resource> {
    pub items: Vec<T>,
    pub selected: Option<T>,
    pub status: LoadStatus,
}

impl<T: Resource> Default for SliceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            status: LoadStatus::Idle,
        }
    }
}

impl<T: Resource> SliceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// The selected record, re-located in the current collection by identifier.
    ///
    /// Returns `None` when nothing is selected or the selected record is no longer part of
    /// `items` (stale selection).
    pub fn selected_in_items(&self) -> Option<&T> {
        let selected = self.selected.as_ref()?;
        select_by_id(&self.items, selected.id())
    }
}

/// Forward scan for the first record whose identifier equals `id`.
pub fn select_by_id<'a, T: Resource>(items: &'a [T], id: &T::Id) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}
