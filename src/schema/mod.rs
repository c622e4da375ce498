//! # Column Schema Resolution
//!
//! Maps the raw, inconsistently-spelled column names of an uploaded table
//! onto the fixed set of canonical label fields. Resolution runs once per
//! dataset, before any row is composed, and the result is read-only from
//! then on.
//!
//! Matching is three-tier, first match wins, per canonical field:
//!
//! 1. **Exact**: raw name and alias are equal after normalization
//!    (strip non-alphanumerics, lowercase).
//! 2. **Substring**: one normalized name contains the other, either
//!    direction.
//! 3. **Heuristic** (line location only): the normalized raw name contains
//!    both "line" and "location", or "lineloc".
//!
//! Resolution itself never fails; missing mandatory fields are reported as
//! a set via [`ResolvedSchema::missing_mandatory`] so the caller can abort
//! the dataset with a single error.

mod alias;

pub use alias::AliasTable;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One of the fixed semantic label attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Assembly,
    PartNumber,
    Description,
    QuantityPerUnit,
    Type,
    LineLocation,
}

impl CanonicalField {
    /// All canonical fields, in payload order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Assembly,
        CanonicalField::PartNumber,
        CanonicalField::Description,
        CanonicalField::QuantityPerUnit,
        CanonicalField::Type,
        CanonicalField::LineLocation,
    ];

    /// Fields whose columns must exist in every dataset.
    pub const MANDATORY: [CanonicalField; 3] = [
        CanonicalField::Assembly,
        CanonicalField::PartNumber,
        CanonicalField::Description,
    ];

    /// The label used for this field in the QR payload.
    pub fn payload_label(&self) -> &'static str {
        match self {
            CanonicalField::Assembly => "ASSLY",
            CanonicalField::PartNumber => "Part No",
            CanonicalField::Description => "Description",
            CanonicalField::QuantityPerUnit => "QTY/BIN",
            CanonicalField::Type => "Type",
            CanonicalField::LineLocation => "Line Location",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CanonicalField::Assembly => "assembly",
            CanonicalField::PartNumber => "part number",
            CanonicalField::Description => "description",
            CanonicalField::QuantityPerUnit => "quantity per unit",
            CanonicalField::Type => "type",
            CanonicalField::LineLocation => "line location",
        };
        f.write_str(name)
    }
}

/// Normalize a column name or alias: strip every non-alphanumeric
/// character and lowercase the rest.
pub fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// The once-per-dataset mapping from canonical field to the raw column
/// name that will supply its values. Read-only after construction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolvedSchema {
    columns: HashMap<CanonicalField, String>,
}

impl ResolvedSchema {
    /// The raw column bound to `field`, if resolution found one.
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        self.columns.get(&field).map(String::as_str)
    }

    /// Mandatory fields with no bound column. Non-empty means the whole
    /// dataset is unusable.
    pub fn missing_mandatory(&self) -> Vec<CanonicalField> {
        CanonicalField::MANDATORY
            .into_iter()
            .filter(|f| !self.columns.contains_key(f))
            .collect()
    }

    /// Iterate over (field, raw column) bindings in payload order.
    pub fn bindings(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        CanonicalField::ALL
            .into_iter()
            .filter_map(|f| self.column(f).map(|c| (f, c)))
    }
}

/// Resolve raw column names against an alias table.
///
/// Iteration order is deterministic: declared alias order, then raw column
/// order. Duplicate raw columns that both match resolve to whichever comes
/// first; a field with no candidate simply stays unbound. This function
/// never fails.
pub fn resolve(raw_columns: &[String], aliases: &AliasTable) -> ResolvedSchema {
    let normalized: Vec<(String, &String)> = raw_columns
        .iter()
        .map(|c| (normalize(c), c))
        .collect();

    let mut columns = HashMap::new();
    for field in CanonicalField::ALL {
        if let Some(raw) = find_column(field, &normalized, aliases) {
            debug!(field = %field, column = %raw, "bound column");
            columns.insert(field, raw.clone());
        }
    }
    ResolvedSchema { columns }
}

fn find_column<'a>(
    field: CanonicalField,
    columns: &[(String, &'a String)],
    aliases: &AliasTable,
) -> Option<&'a String> {
    let alias_norms: Vec<String> = aliases.spellings(field).iter().map(|a| normalize(a)).collect();

    // Tier 1: exact normalized match
    for alias in &alias_norms {
        for (norm, raw) in columns {
            if norm == alias {
                return Some(*raw);
            }
        }
    }

    // Tier 2: substring match, either direction. Columns that normalize to
    // nothing would contain-match every alias, so they are skipped.
    for alias in &alias_norms {
        for (norm, raw) in columns {
            if !norm.is_empty() && (norm.contains(alias.as_str()) || alias.contains(norm.as_str())) {
                return Some(*raw);
            }
        }
    }

    // Tier 3: keyword heuristic, line location only
    if field == CanonicalField::LineLocation {
        for (norm, raw) in columns {
            if (norm.contains("line") && norm.contains("location")) || norm.contains("lineloc") {
                return Some(*raw);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("Part No."), "partno");
        assert_eq!(normalize("LINE_LOCATION"), "linelocation");
        assert_eq!(normalize("Qty / Veh"), "qtyveh");
        assert_eq!(normalize("###"), "");
    }

    #[test]
    fn test_exact_tier_binds_case_and_punctuation_variants() {
        let aliases = AliasTable::builtin();
        for name in ["PARTNO", "part-no.", "Part_No", "pArT nO"] {
            let schema = resolve(&cols(&[name]), &aliases);
            assert_eq!(
                schema.column(CanonicalField::PartNumber),
                Some(name),
                "{name} should bind via the exact tier"
            );
        }
    }

    #[test]
    fn test_substring_tier() {
        let aliases = AliasTable::builtin();
        // "My Assembly Code" is no exact alias but contains "assembly"
        let schema = resolve(&cols(&["My Assembly Code"]), &aliases);
        assert_eq!(schema.column(CanonicalField::Assembly), Some("My Assembly Code"));
    }

    #[test]
    fn test_line_location_heuristic() {
        let aliases = AliasTable::builtin();
        let schema = resolve(&cols(&["Feeder Line Drop Location"]), &aliases);
        assert_eq!(
            schema.column(CanonicalField::LineLocation),
            Some("Feeder Line Drop Location")
        );
    }

    #[test]
    fn test_first_match_wins_on_duplicates() {
        let aliases = AliasTable::builtin();
        let schema = resolve(&cols(&["PARTNO", "Part Number"]), &aliases);
        assert_eq!(schema.column(CanonicalField::PartNumber), Some("PARTNO"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let aliases = AliasTable::builtin();
        let raw = cols(&["Assy Name", "PART", "DESC", "QTY/VEH", "Line Loc"]);
        let first = resolve(&raw, &aliases);
        let second = resolve(&raw, &aliases);
        for field in CanonicalField::ALL {
            assert_eq!(first.column(field), second.column(field));
        }
    }

    #[test]
    fn test_missing_mandatory_reported_as_set() {
        let aliases = AliasTable::builtin();
        let schema = resolve(&cols(&["Type", "Line Location"]), &aliases);
        let missing = schema.missing_mandatory();
        assert_eq!(
            missing,
            vec![
                CanonicalField::Assembly,
                CanonicalField::PartNumber,
                CanonicalField::Description
            ]
        );
    }

    #[test]
    fn test_missing_mandatory_empty_when_all_bound() {
        let aliases = AliasTable::builtin();
        let schema = resolve(&cols(&["Assy Name", "PART", "DESC"]), &aliases);
        assert!(schema.missing_mandatory().is_empty());
        assert_eq!(schema.column(CanonicalField::Assembly), Some("Assy Name"));
        assert_eq!(schema.column(CanonicalField::PartNumber), Some("PART"));
        assert_eq!(schema.column(CanonicalField::Description), Some("DESC"));
    }

    #[test]
    fn test_unresolved_field_stays_unbound() {
        let aliases = AliasTable::builtin();
        let schema = resolve(&cols(&["Assy Name", "PART", "DESC"]), &aliases);
        assert_eq!(schema.column(CanonicalField::QuantityPerUnit), None);
        assert_eq!(schema.column(CanonicalField::LineLocation), None);
    }

    #[test]
    fn test_garbage_column_does_not_swallow_everything() {
        let aliases = AliasTable::builtin();
        // "###" normalizes to "" and must not contain-match every alias
        let schema = resolve(&cols(&["###", "PARTNO"]), &aliases);
        assert_eq!(schema.column(CanonicalField::PartNumber), Some("PARTNO"));
        assert_eq!(schema.column(CanonicalField::Assembly), None);
    }
}
