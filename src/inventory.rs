//! In-memory inventory table and its search operations.

use crate::types::InventoryRow;

/// Outcome of an add-flow lookup. Indices point into the inventory table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddLookup {
    /// No row matched the query.
    NotFound,
    /// Exactly one row matched; safe to add without confirmation.
    Single(usize),
    /// Several rows matched; the caller picks one by position.
    Multiple(Vec<usize>),
}

/// The normalized stock table, rebuilt wholesale on every file load.
///
/// Searches are linear scans; stock files are a few thousand rows at most,
/// so no index is kept.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    rows: Vec<InventoryRow>,
}

impl Inventory {
    #[must_use]
    pub fn new(rows: Vec<InventoryRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&InventoryRow> {
        self.rows.get(index)
    }

    /// Case-insensitive literal substring search over `model` OR
    /// `material_description`, in table order.
    ///
    /// The query is plain text, not a pattern: matching lowercases both
    /// sides and uses containment, so characters that would carry meaning
    /// in a regex engine have none here. Surrounding whitespace is
    /// stripped first; an empty or whitespace-only query returns every row.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&InventoryRow> {
        let needle = query.trim().to_lowercase();
        self.rows
            .iter()
            .filter(|row| {
                needle.is_empty()
                    || row.model.to_lowercase().contains(&needle)
                    || row.material_description.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Stricter lookup driving the add-to-request flow.
    ///
    /// A row is a candidate when its `model` starts with the query
    /// (case-insensitive) or its description contains it. Stricter on model
    /// than [`search`](Self::search) on purpose: prefix matching avoids
    /// accidentally adding a part whose code merely contains the query in
    /// the middle.
    #[must_use]
    pub fn find_for_add(&self, query: &str) -> AddLookup {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return AddLookup::NotFound;
        }

        let hits: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.model.to_lowercase().starts_with(&needle)
                    || row.material_description.to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect();

        match hits.as_slice() {
            [] => AddLookup::NotFound,
            [only] => AddLookup::Single(*only),
            _ => AddLookup::Multiple(hits),
        }
    }
}
