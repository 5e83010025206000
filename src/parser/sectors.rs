//! Sector name canonicalization.
//!
//! The source files carry Russian sector names; the dashboard reports them in
//! English. Names missing from the table pass through unchanged.

use std::collections::HashMap;

/// Built-in source name → canonical name pairs.
pub const DEFAULT_TRANSLATIONS: &[(&str, &str)] = &[
    ("Промышленность", "Industry"),
    ("Сельское хозяйство", "Agriculture"),
    ("Строительство", "Construction"),
    ("Торговля и общественное питание", "Trade"),
    ("Транспорт и связь", "Transport"),
    ("Материально-техническое снабжение и сбыт", "Supply"),
    ("Жилищно-коммунальное обслуживание", "Housing"),
    ("Физические лица", "Individuals"),
    ("Прочие", "Other"),
    ("Прочие отрасли", "Other"),
];

/// Immutable name map, built once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct SectorTable {
    names: HashMap<String, String>,
}

impl SectorTable {
    pub fn builtin() -> Self {
        Self::from_pairs(
            DEFAULT_TRANSLATIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string())),
        )
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            names: pairs.into_iter().collect(),
        }
    }

    /// Built-in table with `overrides` layered on top.
    pub fn with_overrides<'a>(overrides: impl IntoIterator<Item = (&'a String, &'a String)>) -> Self {
        let mut table = Self::builtin();
        for (from, to) in overrides {
            table.names.insert(from.trim().to_string(), to.trim().to_string());
        }
        table
    }

    pub fn canonical<'a>(&'a self, raw: &'a str) -> &'a str {
        self.names.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
