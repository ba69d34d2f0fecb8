//! Column resolution - maps arbitrary source headers to the canonical schema.
//!
//! Stock files come from different branches with different header spellings
//! ("Material Description", "material_description", "DESC"). Resolution
//! normalizes both sides and does a literal list lookup against a fixed
//! alias table, in priority order. No edit-distance matching.

use serde::Serialize;

use crate::error::{Result, StockError};

/// One of the seven canonical inventory attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Model,
    MaterialDescription,
    Shrm,
    Home,
    Stock,
    UsedSpares,
    Price,
}

impl Field {
    /// All fields, in canonical column order.
    pub const ALL: [Self; 7] = [
        Self::Model,
        Self::MaterialDescription,
        Self::Shrm,
        Self::Home,
        Self::Stock,
        Self::UsedSpares,
        Self::Price,
    ];

    /// Acceptable raw header spellings, in priority order.
    #[must_use]
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Model => &["model", "partno", "partnumber", "itemcode", "material"],
            Self::MaterialDescription => &[
                "materialdescription",
                "description",
                "desc",
                "itemdesc",
                "materialdesc",
            ],
            Self::Shrm => &["shrm", "showroom"],
            Self::Home => &["home", "godown", "warehouse"],
            Self::Stock => &["stock", "qty", "quantity", "onhand"],
            Self::UsedSpares => &["usedspares", "used spares", "used"],
            Self::Price => &["price", "unitprice", "cost", "salesprice"],
        }
    }

    /// Whether a load must fail when this field cannot be resolved.
    #[must_use]
    pub fn is_required(self) -> bool {
        matches!(self, Self::Model | Self::MaterialDescription)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Model => "model",
            Self::MaterialDescription => "material_description",
            Self::Shrm => "shrm",
            Self::Home => "home",
            Self::Stock => "stock",
            Self::UsedSpares => "used_spares",
            Self::Price => "price",
        };
        f.write_str(name)
    }
}

/// Normalize a header for matching: lowercase, then keep only `[a-z0-9]`.
///
/// "Material Description", "material_description" and "MATERIALDESCRIPTION"
/// all normalize to "materialdescription".
#[must_use]
pub fn normalize_header(s: &str) -> String {
    s.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Mapping from logical fields to actual source columns.
///
/// Built once per loaded file; immutable after construction.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    entries: Vec<(Field, usize, String)>,
}

impl ColumnMap {
    /// Resolve a source header row against the candidate alias table.
    ///
    /// For each field, the first alias (in list order) whose normalized form
    /// exists among the normalized source headers wins.
    ///
    /// # Errors
    /// Returns [`StockError::Schema`] if `model` or `material_description`
    /// cannot be resolved; all other fields are optional.
    pub fn build<S: AsRef<str>>(headers: &[S]) -> Result<Self> {
        let normalized: Vec<(String, usize)> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h.as_ref()), i))
            .collect();

        let mut entries = Vec::new();
        for field in Field::ALL {
            let hit = field.aliases().iter().find_map(|alias| {
                let want = normalize_header(alias);
                normalized
                    .iter()
                    .find(|(norm, _)| *norm == want)
                    .map(|&(_, idx)| idx)
            });
            if let Some(idx) = hit {
                let original = headers
                    .get(idx)
                    .map(|h| h.as_ref().to_string())
                    .unwrap_or_default();
                entries.push((field, idx, original));
            } else if field.is_required() {
                return Err(StockError::Schema {
                    field,
                    aliases: field.aliases().to_vec(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Source column index for a logical field, if resolved.
    #[must_use]
    pub fn column(&self, field: Field) -> Option<usize> {
        self.entries
            .iter()
            .find(|(f, _, _)| *f == field)
            .map(|&(_, idx, _)| idx)
    }

    /// Original source header a logical field was resolved to, if any.
    #[must_use]
    pub fn source_header(&self, field: Field) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _, _)| *f == field)
            .map(|(_, _, h)| h.as_str())
    }

    /// Whether a logical field was resolved at all.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.column(field).is_some()
    }
}
