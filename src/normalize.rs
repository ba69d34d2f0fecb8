//! Row normalization - turns a raw string grid into typed inventory rows.

use log::debug;

use crate::coerce::{to_float, to_qty};
use crate::schema::{ColumnMap, Field};
use crate::types::{InventoryRow, RawTable};

/// Normalize every source row into an [`InventoryRow`], in source order.
///
/// Unmapped text fields default to empty strings, unmapped numeric fields to
/// zero. When no `stock` column was resolved, stock derives as `shrm + home`
/// per row. Coercion is total: a cell that fails to parse becomes the zero
/// value for its type and is logged at debug level only. Per-cell noise is
/// not surfaced to the caller.
#[must_use]
pub fn normalize_rows(raw: &RawTable, colmap: &ColumnMap) -> Vec<InventoryRow> {
    let text_cell = |row: usize, field: Field| -> String {
        colmap
            .column(field)
            .map(|col| raw.cell(row, col).trim().to_string())
            .unwrap_or_default()
    };
    let qty_cell = |row: usize, field: Field| -> u32 {
        colmap
            .column(field)
            .map(|col| {
                let cell = raw.cell(row, col);
                let n = to_qty(cell);
                if n == 0 && !cell.trim().is_empty() && cell.trim() != "0" {
                    debug!("row {row}: {field} cell {cell:?} coerced to 0");
                }
                n
            })
            .unwrap_or(0)
    };

    let has_stock_column = colmap.contains(Field::Stock);

    (0..raw.rows.len())
        .map(|i| {
            let shrm = qty_cell(i, Field::Shrm);
            let home = qty_cell(i, Field::Home);
            let stock = if has_stock_column {
                qty_cell(i, Field::Stock)
            } else {
                shrm.saturating_add(home)
            };
            let price = colmap
                .column(Field::Price)
                .map(|col| to_float(raw.cell(i, col)).max(0.0))
                .unwrap_or(0.0);

            InventoryRow {
                model: text_cell(i, Field::Model),
                material_description: text_cell(i, Field::MaterialDescription),
                shrm,
                home,
                stock,
                used_spares: qty_cell(i, Field::UsedSpares),
                price,
            }
        })
        .collect()
}
