//! sparefind - spare-parts stock lookup and request-list builder
//!
//! Loads a tabular stock file (XLSX or CSV), resolves its headers against a
//! canonical schema, and lets a caller search the normalized table, build a
//! request list with editable quantities, and export that list as XLSX:
//! - Header resolution via fuzzy name normalization against alias lists
//! - Total cell coercion (garbage in, zero-defaults out)
//! - Derived stock (`shrm + home`) when no stock column exists
//! - Positional request-grid reconciliation
//!
//! # Usage
//!
//! ```
//! use sparefind::session::Session;
//! use sparefind::inventory::AddLookup;
//!
//! let csv = b"Model,Description,SHRM,Home,Price\nHR2470,Rotary Hammer,2,3,100\n";
//! let mut session = Session::new();
//! session.load_source("stocks.csv", csv)?;
//!
//! if let AddLookup::Single(idx) = session.find_for_add("HR2470") {
//!     session.add_to_request(idx)?;
//! }
//! let xlsx = session.export_requests()?;
//! assert!(!xlsx.is_empty());
//! # Ok::<(), sparefind::error::StockError>(())
//! ```

pub mod cell_ref;
pub mod coerce;
mod csv;
pub mod error;
pub mod export;
pub mod inventory;
pub mod normalize;
pub mod parser;
pub mod request;
pub mod schema;
pub mod session;
pub mod types;

pub use error::{Result, StockError};
pub use export::EXPORT_FILENAME;
pub use inventory::{AddLookup, Inventory};
pub use request::{RequestEdit, RequestList};
pub use schema::{ColumnMap, Field};
pub use session::Session;
pub use types::{InventoryRow, RawTable, RequestItem, StockLevel, Totals};

/// Get the library version
#[must_use]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
