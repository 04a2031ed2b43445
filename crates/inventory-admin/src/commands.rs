//! Command-line flows over the admin screens.
//!
//! Each command drives the same view-models a graphical front-end would: `list` mounts a
//! page and renders its table, `delete` walks the row menu through its confirmation dialog.

use crate::model::ResourceKind;
use crate::system::{AdminError, AdminSystem, Managed};
use slice_framework::view::{EmptyState, TableModel, NOT_AVAILABLE};
use slice_framework::Resource;
use std::fmt::Write as _;
use tracing::info;

/// Renders one page of `T`'s table. `page` is 1-based.
pub async fn list<T: Managed>(
    system: &AdminSystem,
    page: usize,
    page_size: usize,
) -> Result<String, AdminError> {
    let mut screen = system.page::<T>();
    screen.mount().await;
    screen.list().set_page_size(page_size)?;
    screen.list().set_page(page.saturating_sub(1));
    Ok(format_table(&screen.table()))
}

/// Fetches one record and renders it as `header: value` lines.
pub async fn show<T: Managed>(system: &AdminSystem, raw_id: &str) -> Result<String, AdminError> {
    let id = parse_id::<T>(raw_id)?;
    let record = system.slice::<T>().fetch_one(id).await?;

    let mut out = format!("{} {}\n", T::LABEL, record.id());
    for column in T::columns() {
        let cell = (column.cell)(&record).unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let _ = writeln!(out, "  {}: {}", column.header, cell);
    }
    Ok(out)
}

/// Deletes one record through the row menu's confirmation flow.
pub async fn delete<T: Managed>(system: &AdminSystem, raw_id: &str) -> Result<(), AdminError> {
    let id = parse_id::<T>(raw_id)?;
    let mut screen = system.page::<T>();
    screen.mount().await;

    let mut menu = screen.row_menu(id);
    menu.open();
    menu.request_delete();
    if let Some(dialog) = menu.dialog::<T>() {
        info!(title = %dialog.title, body = dialog.body, "Confirming");
    }
    menu.confirm(&screen.slice()).await?;
    Ok(())
}

fn parse_id<T: Managed>(raw: &str) -> Result<T::Id, AdminError> {
    T::parse_id(raw).ok_or_else(|| AdminError::InvalidId {
        resource: T::KIND,
        value: raw.to_string(),
    })
}

/// Plain-text rendering of a [`TableModel`].
pub fn format_table(table: &TableModel) -> String {
    let mut headers = vec!["ID"];
    headers.extend(&table.headers);

    let rows: Vec<Vec<&str>> = table
        .rows
        .iter()
        .map(|row| {
            std::iter::once(row.key.as_str())
                .chain(row.cells.iter().map(String::as_str))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| width(row[i]))
                .chain(std::iter::once(width(header)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{}\n\n", table.title);
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(
        &mut out,
        &rule.iter().map(String::as_str).collect::<Vec<_>>(),
        &widths,
    );
    for row in &rows {
        push_line(&mut out, row, &widths);
    }

    match &table.empty {
        Some(EmptyState::Loading) => out.push_str("Cargando...\n"),
        Some(EmptyState::Empty(message)) => {
            let _ = writeln!(out, "{message}");
        }
        None => {}
    }

    let _ = writeln!(
        out,
        "\nPágina {} de {} ({} registros, {} por página)",
        table.pagination.page + 1,
        table.pagination.page_count(table.total),
        table.total,
        table.pagination.page_size,
    );
    out
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

/// All resources, one per line: endpoint and label.
pub fn resource_listing() -> String {
    ResourceKind::ALL
        .iter()
        .map(|kind| format!("{:<20} {}\n", kind.endpoint(), kind.label()))
        .collect()
}
