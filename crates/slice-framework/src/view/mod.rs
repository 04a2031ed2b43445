//! # Views
//!
//! Headless view-models for the three screens every resource shares: the paginated table,
//! the edit panel and the row action menu. They hold view-local state only and read and
//! mutate the collection exclusively through the [`SliceClient`](crate::SliceClient) they
//! are given. A front-end draws the models they produce.

pub mod form;
pub mod list;
pub mod menu;
pub mod page;
pub mod panel;

pub use form::{
    form_value, Editable, FieldErrors, FieldKind, FieldSpec, FormField, FormSchema, FormValues,
};
pub use list::{
    Column, EmptyState, ListView, PageSizeError, Pagination, RowModel, TableModel, Tabular,
    NOT_AVAILABLE, PAGE_SIZE_OPTIONS,
};
pub use menu::{ConfirmDialog, MenuState, RowActionMenu};
pub use page::AdminPage;
pub use panel::{EditPanel, PanelError, SubmitOutcome, SubmitPolicy};
