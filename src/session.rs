//! One user's working state: the loaded inventory plus the request list.
//!
//! Both live in an explicit session object passed to every operation, with
//! clear init (first load) and reset semantics. Single-threaded,
//! synchronous, no locking.

use std::path::Path;

use log::info;

use crate::error::{Result, StockError};
use crate::inventory::{AddLookup, Inventory};
use crate::normalize::normalize_rows;
use crate::request::{RequestEdit, RequestList};
use crate::schema::ColumnMap;
use crate::types::{InventoryRow, RawTable, RequestItem, Totals};

/// Session state for one interactive user.
#[derive(Debug, Default)]
pub struct Session {
    inventory: Option<Inventory>,
    requests: RequestList,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stock file has been loaded.
    #[must_use]
    pub fn has_inventory(&self) -> bool {
        self.inventory.is_some()
    }

    /// The loaded inventory table, if any.
    #[must_use]
    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.as_ref()
    }

    /// Load (or replace) the stock table from source-file bytes.
    ///
    /// The container format is picked by the extension of `name`:
    /// `.xlsx`/`.xls` parse as XLSX, `.csv` as CSV, anything else fails with
    /// [`StockError::Format`]. The whole file is parsed, resolved, and
    /// normalized before any state changes; on failure the previously
    /// loaded inventory and the request list are untouched. On success the
    /// old table is replaced wholesale (no merge) and any pending requests
    /// are dropped, since their rows may no longer exist in the new table.
    ///
    /// # Errors
    /// [`StockError::Format`] on an unrecognized extension,
    /// [`StockError::Schema`] when required columns cannot be resolved, or a
    /// container-level error when the bytes are unreadable.
    pub fn load_source(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let raw = parse_container(name, data)?;
        let colmap = ColumnMap::build(&raw.headers)?;
        let rows = normalize_rows(&raw, &colmap);

        info!("loaded {} rows from {name}", rows.len());
        self.inventory = Some(Inventory::new(rows));
        self.requests.clear();
        Ok(())
    }

    /// Load a stock file from disk. See [`load_source`](Self::load_source).
    ///
    /// # Errors
    /// As `load_source`, plus I/O errors reading the file.
    pub fn load_source_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.load_source(&name, &data)
    }

    /// Case-insensitive substring search over the loaded table.
    ///
    /// Returns an empty list when nothing is loaded.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&InventoryRow> {
        self.inventory
            .as_ref()
            .map(|inv| inv.search(query))
            .unwrap_or_default()
    }

    /// Stricter add-flow lookup. See [`Inventory::find_for_add`].
    #[must_use]
    pub fn find_for_add(&self, query: &str) -> AddLookup {
        self.inventory
            .as_ref()
            .map_or(AddLookup::NotFound, |inv| inv.find_for_add(query))
    }

    /// Add an inventory row (by table index) to the request list.
    ///
    /// # Errors
    /// Fails when the index is out of range or nothing is loaded; the
    /// request list is unaffected in that case.
    pub fn add_to_request(&mut self, index: usize) -> Result<()> {
        let row = self
            .inventory
            .as_ref()
            .and_then(|inv| inv.get(index))
            .ok_or_else(|| StockError::Other(format!("no inventory row at index {index}")))?;
        let row = row.clone();
        self.requests.add(&row);
        Ok(())
    }

    /// Current request-list entries.
    #[must_use]
    pub fn request_items(&self) -> &[RequestItem] {
        self.requests.items()
    }

    /// Reconcile the request list against an edited grid copy.
    pub fn set_quantities(&mut self, edits: Vec<RequestEdit>) {
        self.requests.set_quantities(edits);
    }

    /// Request-list totals, recomputed from current state.
    #[must_use]
    pub fn totals(&self) -> Totals {
        self.requests.totals()
    }

    /// Empty the request list.
    pub fn clear_requests(&mut self) {
        self.requests.clear();
    }

    /// Export the request list as XLSX bytes.
    ///
    /// # Errors
    /// Returns an error if the workbook cannot be written.
    pub fn export_requests(&self) -> Result<Vec<u8>> {
        self.requests.export()
    }

    /// Drop the inventory and clear the request list.
    pub fn reset(&mut self) {
        self.inventory = None;
        self.requests.clear();
    }
}

/// Dispatch container parsing by file extension.
fn parse_container(name: &str, data: &[u8]) -> Result<RawTable> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" => crate::parser::parse_xlsx(data),
        "csv" => crate::csv::parse_csv(data),
        _ => Err(StockError::Format(format!(".{ext}"))),
    }
}
