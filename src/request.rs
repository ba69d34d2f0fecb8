//! The request list: the user's working selection of parts.

use crate::coerce::to_qty;
use crate::error::Result;
use crate::types::{InventoryRow, RequestItem, Totals};

/// One row coming back from an editable request grid.
///
/// Grid cells are free-form text, so the quantity arrives raw and is coerced
/// during reconciliation.
#[derive(Debug, Clone)]
pub struct RequestEdit {
    pub row: InventoryRow,
    pub qty: String,
}

/// Ordered, mutable collection of selected parts with per-line quantities.
///
/// Duplicates are allowed: adding the same model twice appends two
/// independent lines. Line totals are derived on demand, never stored.
#[derive(Debug, Clone, Default)]
pub struct RequestList {
    items: Vec<RequestItem>,
}

impl RequestList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[RequestItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append a new line copied from `row` with `qty = 1`. No dedup.
    pub fn add(&mut self, row: &InventoryRow) {
        self.items.push(RequestItem::from_row(row));
    }

    /// Reconcile the list against a fully edited copy from a grid.
    ///
    /// Row identity is positional: the edited sequence replaces the list
    /// exactly, so rows deleted (or added) in the grid are deleted (or
    /// added) here. Blank or unparseable quantities coerce to 0; negative
    /// quantities are silently floored to 0, never rejected.
    pub fn set_quantities(&mut self, edits: Vec<RequestEdit>) {
        self.items = edits
            .into_iter()
            .map(|edit| {
                let mut item = RequestItem::from_row(&edit.row);
                item.qty = to_qty(&edit.qty);
                item
            })
            .collect();
    }

    /// Current totals, recomputed from scratch on every call.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            item_count: self.items.len(),
            total_qty: self.items.iter().map(|i| u64::from(i.qty)).sum(),
            total_amount: self.items.iter().map(RequestItem::line_total).sum(),
        }
    }

    /// Empty the list unconditionally.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Serialize the list to XLSX bytes for download.
    ///
    /// One row per item, columns in [`RequestItem`] field order with
    /// `line_total` appended last.
    ///
    /// # Errors
    /// Returns an error if the workbook archive cannot be written.
    pub fn export(&self) -> Result<Vec<u8>> {
        crate::export::write_request_xlsx(&self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use super::*;

    fn row(model: &str, price: f64) -> InventoryRow {
        InventoryRow {
            model: model.to_string(),
            material_description: format!("{model} part"),
            shrm: 1,
            home: 2,
            stock: 3,
            used_spares: 0,
            price,
        }
    }

    #[test]
    fn test_add_appends_with_qty_one() {
        let mut list = RequestList::new();
        list.add(&row("M1", 10.0));
        list.add(&row("M1", 10.0));
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].qty, 1);
        assert_eq!(list.items()[1].qty, 1);
    }

    #[test]
    fn test_set_quantities_clamps_and_coerces() {
        let mut list = RequestList::new();
        for _ in 0..3 {
            list.add(&row("M1", 1.0));
        }
        let edits: Vec<RequestEdit> = ["-5", "abc", "3"]
            .iter()
            .map(|q| RequestEdit {
                row: row("M1", 1.0),
                qty: (*q).to_string(),
            })
            .collect();
        list.set_quantities(edits);
        let qtys: Vec<u32> = list.items().iter().map(|i| i.qty).collect();
        assert_eq!(qtys, vec![0, 0, 3]);
    }

    #[test]
    fn test_set_quantities_replaces_positionally() {
        let mut list = RequestList::new();
        list.add(&row("M1", 1.0));
        list.add(&row("M2", 2.0));
        list.add(&row("M3", 3.0));
        // Grid deleted the middle row.
        let edits = vec![
            RequestEdit {
                row: row("M1", 1.0),
                qty: "2".into(),
            },
            RequestEdit {
                row: row("M3", 3.0),
                qty: "1".into(),
            },
        ];
        list.set_quantities(edits);
        assert_eq!(list.len(), 2);
        assert_eq!(list.items()[0].model, "M1");
        assert_eq!(list.items()[1].model, "M3");
    }

    #[test]
    fn test_totals_empty() {
        let list = RequestList::new();
        let t = list.totals();
        assert_eq!(t.item_count, 0);
        assert_eq!(t.total_qty, 0);
        assert_eq!(t.total_amount, 0.0);
    }

    #[test]
    fn test_totals_recomputed_after_edit() {
        let mut list = RequestList::new();
        list.add(&row("M1", 12.5));
        let edits = vec![RequestEdit {
            row: row("M1", 12.5),
            qty: "4".into(),
        }];
        list.set_quantities(edits);
        let t = list.totals();
        assert_eq!(t.item_count, 1);
        assert_eq!(t.total_qty, 4);
        assert_eq!(t.total_amount, 50.0);
    }

    #[test]
    fn test_clear() {
        let mut list = RequestList::new();
        list.add(&row("M1", 1.0));
        list.clear();
        assert!(list.is_empty());
    }
}
