//! Paginated table over a slice's collection.
//!
//! Pagination is purely client-side: the API always returns the full collection and page
//! index and size are view-local. This holds for small collections only.

use crate::client::SliceClient;
use crate::entity::{entity_type, Resource};
use crate::state::SliceState;
use tracing::{debug, warn};

/// Placeholder rendered for null, missing or empty values.
pub const NOT_AVAILABLE: &str = "N/A";

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// One table column: header and how to read the cell from a record.
pub struct Column<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> Option<String>,
}

impl<T> Column<T> {
    pub fn new(header: &'static str, cell: fn(&T) -> Option<String>) -> Self {
        Self { header, cell }
    }
}

/// A resource that can be listed in a table.
pub trait Tabular: Resource {
    /// Page heading, e.g. "Registro de Productos".
    const TITLE: &'static str;
    /// Label of the create trigger, e.g. "Agregar Producto".
    const CREATE_LABEL: &'static str;
    /// Shown when the collection is empty, e.g. "No hay productos".
    const EMPTY_MESSAGE: &'static str;

    fn columns() -> Vec<Column<Self>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE_OPTIONS[0],
        }
    }
}

impl Pagination {
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    Loading,
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    /// Rendered identifier; rows are keyed by it.
    pub key: String,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub title: &'static str,
    pub create_label: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<RowModel>,
    /// Content of the empty-state slot, when there is nothing to show.
    pub empty: Option<EmptyState>,
    pub pagination: Pagination,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageSizeError {
    #[error("Page size {0} is not one of {PAGE_SIZE_OPTIONS:?}")]
    Unsupported(usize),
}

/// Table view bound to one slice.
pub struct ListView<T: Tabular> {
    slice: SliceClient<T>,
    pagination: Pagination,
    mounted: bool,
}

impl<T: Tabular> ListView<T> {
    pub fn new(slice: SliceClient<T>) -> Self {
        Self {
            slice,
            pagination: Pagination::default(),
            mounted: false,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Dispatches the initial fetch. Only the first call per mount reaches the slice.
    ///
    /// Read failures are logged and swallowed: the table falls back to its empty state.
    pub async fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if let Err(e) = self.slice.fetch_all().await {
            warn!(entity_type = entity_type::<T>(), error = %e, "Initial fetch failed");
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pagination = Pagination::default();
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn set_page(&mut self, page: usize) {
        self.pagination.page = page;
        self.pagination.clamp(self.slice.state().items.len());
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), PageSizeError> {
        if !PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(PageSizeError::Unsupported(page_size));
        }
        self.pagination.page_size = page_size;
        self.pagination.clamp(self.slice.state().items.len());
        Ok(())
    }

    /// Renders the current slice snapshot.
    pub fn table(&self) -> TableModel {
        self.render(&self.slice.state())
    }

    pub fn render(&self, state: &SliceState<T>) -> TableModel {
        let columns = T::columns();
        let total = state.items.len();
        let mut pagination = self.pagination;
        pagination.clamp(total);

        let rows: Vec<RowModel> = state
            .items
            .iter()
            .skip(pagination.page * pagination.page_size)
            .take(pagination.page_size)
            .map(|item| RowModel {
                key: item.id().to_string(),
                cells: columns
                    .iter()
                    .map(|column| {
                        (column.cell)(item).unwrap_or_else(|| NOT_AVAILABLE.to_string())
                    })
                    .collect(),
            })
            .collect();

        let empty = match (rows.is_empty(), state.is_loading()) {
            (false, _) => None,
            (true, true) => Some(EmptyState::Loading),
            (true, false) => Some(EmptyState::Empty(T::EMPTY_MESSAGE)),
        };
        debug!(entity_type = entity_type::<T>(), total, page = pagination.page, "Render");

        TableModel {
            title: T::TITLE,
            create_label: T::CREATE_LABEL,
            headers: columns.iter().map(|column| column.header).collect(),
            rows,
            empty,
            pagination,
            total,
        }
    }
}
