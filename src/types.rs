//! Core data model: raw tables, normalized inventory rows, request items.

use serde::Serialize;

/// Stock below this count is flagged low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;
/// Stock below this count (but not low) is flagged medium.
pub const MEDIUM_STOCK_THRESHOLD: u32 = 10;

/// A container-format-independent grid of string cells.
///
/// Both the XLSX and CSV readers produce this; typing happens later in the
/// normalizer. Row 0 of the source file is split off as `headers`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Cell at (row, col), empty string when the row is ragged/short.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }
}

/// Coarse stock-level classification used for reorder hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StockLevel {
    Low,
    Medium,
    Ok,
}

impl StockLevel {
    #[must_use]
    pub fn classify(stock: u32) -> Self {
        if stock < LOW_STOCK_THRESHOLD {
            Self::Low
        } else if stock < MEDIUM_STOCK_THRESHOLD {
            Self::Medium
        } else {
            Self::Ok
        }
    }
}

/// One normalized stock record.
///
/// `stock` is always defined: the explicit column value when the source has
/// one, otherwise `shrm + home`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub model: String,
    pub material_description: String,
    /// Showroom quantity.
    pub shrm: u32,
    /// Warehouse quantity.
    pub home: u32,
    pub stock: u32,
    pub used_spares: u32,
    pub price: f64,
}

impl InventoryRow {
    #[must_use]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }
}

/// One entry in the request list: a copy of an inventory row plus a
/// user-controlled quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestItem {
    pub model: String,
    pub material_description: String,
    pub shrm: u32,
    pub home: u32,
    pub stock: u32,
    pub used_spares: u32,
    pub price: f64,
    pub qty: u32,
}

impl RequestItem {
    /// Build a request entry from an inventory row with `qty = 1`.
    #[must_use]
    pub fn from_row(row: &InventoryRow) -> Self {
        Self {
            model: row.model.clone(),
            material_description: row.material_description.clone(),
            shrm: row.shrm,
            home: row.home,
            stock: row.stock,
            used_spares: row.used_spares,
            price: row.price,
            qty: 1,
        }
    }

    /// `price * qty`, always derived, never stored.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.qty)
    }

    /// The inventory fields of this entry, without the quantity.
    ///
    /// Grid editors hand rows back whole; reconciliation rebuilds items
    /// from this plus the edited quantity cell.
    #[must_use]
    pub fn to_row(&self) -> InventoryRow {
        InventoryRow {
            model: self.model.clone(),
            material_description: self.material_description.clone(),
            shrm: self.shrm,
            home: self.home,
            stock: self.stock,
            used_spares: self.used_spares,
            price: self.price,
        }
    }
}

/// Snapshot of request-list totals, recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub item_count: usize,
    pub total_qty: u64,
    pub total_amount: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level_thresholds() {
        assert_eq!(StockLevel::classify(0), StockLevel::Low);
        assert_eq!(StockLevel::classify(4), StockLevel::Low);
        assert_eq!(StockLevel::classify(5), StockLevel::Medium);
        assert_eq!(StockLevel::classify(9), StockLevel::Medium);
        assert_eq!(StockLevel::classify(10), StockLevel::Ok);
    }

    #[test]
    fn test_line_total_is_derived() {
        let row = InventoryRow {
            model: "M1".into(),
            material_description: "Drill".into(),
            shrm: 1,
            home: 1,
            stock: 2,
            used_spares: 0,
            price: 12.5,
        };
        let mut item = RequestItem::from_row(&row);
        assert_eq!(item.qty, 1);
        assert_eq!(item.line_total(), 12.5);
        item.qty = 4;
        assert_eq!(item.line_total(), 50.0);
    }

    #[test]
    fn test_raw_table_ragged_rows() {
        let table = RawTable {
            headers: vec!["a".into(), "b".into()],
            rows: vec![vec!["1".into()]],
        };
        assert_eq!(table.cell(0, 0), "1");
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(9, 0), "");
    }
}
