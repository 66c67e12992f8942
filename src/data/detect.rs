use serde_json::Value;

use crate::core::Delimiter;

/// Outcome of sniffing a text payload.
#[derive(Debug, Clone, PartialEq)]
pub enum TextShape {
    Json(Value),
    Delimited(Delimiter),
    Free,
}

/// Classifies text as JSON, delimited (CSV/TSV) or free text.
///
/// JSON is attempted first. Delimited text needs a comma or tab and at least
/// one newline, so single-column CSV is reported as free text.
#[must_use]
pub fn classify_text(text: &str) -> TextShape {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return TextShape::Json(value);
    }

    let trimmed = text.trim();
    if !trimmed.contains('\n') {
        return TextShape::Free;
    }

    let first_line = trimmed.lines().next().unwrap_or_default();
    if first_line.contains('\t') {
        TextShape::Delimited(Delimiter::Tab)
    } else if trimmed.contains(',') {
        TextShape::Delimited(Delimiter::Comma)
    } else if trimmed.contains('\t') {
        TextShape::Delimited(Delimiter::Tab)
    } else {
        TextShape::Free
    }
}
