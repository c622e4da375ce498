//! Accepted raw-name spellings for each canonical field.
//!
//! The table is defined once and never mutated. Order matters: the
//! resolver walks spellings in declared order, so earlier spellings win
//! ties in the substring tier.

use super::CanonicalField;

const ASSEMBLY: &[&str] = &["assly", "assy name", "assembly", "assembly name"];

const PART_NUMBER: &[&str] = &[
    "part no",
    "part number",
    "part num",
    "part",
    "product code",
    "item number",
    "item id",
    "item no",
    "item",
];

const DESCRIPTION: &[&str] = &[
    "description",
    "desc",
    "part description",
    "item description",
    "product description",
    "name",
    "item name",
    "product name",
];

// "qyt" is a long-standing upstream typo; datasets exist that carry it.
const QUANTITY_PER_UNIT: &[&str] = &[
    "qyt",
    "qty/veh",
    "qty bin",
    "quantity per bin",
    "quantity bin",
    "bin qty",
    "qty per bin",
    "bin quantity",
    "bin",
];

const TYPE: &[&str] = &["type", "type name"];

const LINE_LOCATION: &[&str] = &["line location", "line loc"];

/// Static mapping from canonical field to its accepted spellings.
///
/// Spellings are compared after [`normalize`](super::normalize), so case
/// and punctuation variants need not be listed separately.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable(());

impl AliasTable {
    /// The built-in alias table.
    pub fn builtin() -> Self {
        AliasTable(())
    }

    /// Accepted spellings for `field`, in priority order.
    pub fn spellings(&self, field: CanonicalField) -> &'static [&'static str] {
        match field {
            CanonicalField::Assembly => ASSEMBLY,
            CanonicalField::PartNumber => PART_NUMBER,
            CanonicalField::Description => DESCRIPTION,
            CanonicalField::QuantityPerUnit => QUANTITY_PER_UNIT,
            CanonicalField::Type => TYPE,
            CanonicalField::LineLocation => LINE_LOCATION,
        }
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}
