//! Annotation alignment.
//!
//! Merges a primary table with optional sample and variable annotation tables
//! into one canonical `{y, x, z}` payload, guessing each annotation table's
//! orientation from its labels.

mod strategy;

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::keys::{DATA, SMPS, VARS, X, Y, Z};
use crate::core::{DataFrame, JsonMap};
use crate::error::{AnnotationAxis, CxError, CxResult};

pub use strategy::{Alignment, AlignmentStrategy, resolve_alignment};

/// Builds `{y, x, z}` from a primary frame and optional annotation frames.
///
/// The primary frame contributes `y.vars` (index), `y.smps` (columns) and
/// `y.data` (rows). Sample annotations are aligned against `smps` into `x`,
/// variable annotations against `vars` into `z`. Missing or empty annotation
/// tables leave the corresponding key out entirely.
pub fn merge_frames_into_xyz(
    data: &DataFrame,
    sample_annotation: Option<&DataFrame>,
    variable_annotation: Option<&DataFrame>,
) -> CxResult<JsonMap> {
    let mut y = JsonMap::new();
    y.insert(VARS.to_owned(), Value::Array(data.index().to_vec()));
    y.insert(SMPS.to_owned(), Value::Array(data.columns().to_vec()));
    y.insert(
        DATA.to_owned(),
        Value::Array(data.rows().iter().cloned().map(Value::Array).collect()),
    );

    let mut payload = JsonMap::new();
    payload.insert(Y.to_owned(), Value::Object(y));

    if let Some(x) = align_annotation(AnnotationAxis::Sample, sample_annotation, data.columns())? {
        payload.insert(X.to_owned(), Value::Object(x));
    }
    if let Some(z) = align_annotation(AnnotationAxis::Variable, variable_annotation, data.index())? {
        payload.insert(Z.to_owned(), Value::Object(z));
    }
    Ok(payload)
}

/// Aligns one annotation table against `targets`.
///
/// Returns `Ok(None)` for an absent or empty table, or when alignment yields
/// no entries.
pub fn align_annotation(
    axis: AnnotationAxis,
    table: Option<&DataFrame>,
    targets: &[Value],
) -> CxResult<Option<JsonMap>> {
    let Some(table) = table.filter(|table| !table.is_empty()) else {
        return Ok(None);
    };

    let alignment = resolve_alignment(table, targets);
    match alignment {
        Alignment::Confident(strategy) => {
            debug!(axis = %axis, strategy = strategy.name(), "aligned annotation table");
        }
        Alignment::NoConfidentAlignment => {
            warn!(
                axis = %axis,
                rows = table.row_count(),
                cols = table.column_count(),
                "no annotation strategy matched the primary labels; falling back to index alignment"
            );
        }
    }

    let entries = alignment
        .strategy()
        .apply(table)
        .map_err(|source| CxError::Alignment {
            axis,
            source: Box::new(source),
        })?;
    Ok((!entries.is_empty()).then_some(entries))
}
