//! QR payload assembly.
//!
//! The payload is a flat `Label: value` text block in a fixed field
//! order, independent of the input column order, terminated by a date
//! line with no trailing newline. The engine treats the result as opaque
//! — it goes to the QR encoder unmodified.

use super::FieldValues;

/// Build the payload for one label.
///
/// Absent or empty fields are skipped entirely rather than rendered as
/// empty lines.
pub fn build(fields: &FieldValues, date: &str) -> String {
    let mut payload = String::new();
    for (field, value) in fields.in_payload_order() {
        if !value.is_empty() {
            payload.push_str(field.payload_label());
            payload.push_str(": ");
            payload.push_str(value);
            payload.push('\n');
        }
    }
    payload.push_str("Date: ");
    payload.push_str(date);
    payload
}
