//! Header labels for CSV exports.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::locale::{ucfirst, Messages, Translator, CSV_NAMESPACE};

/// A column descriptor as it arrives from an export definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumn {
    /// Column identifier, e.g. `"qta_evasa"`.
    #[serde(default)]
    pub id: Option<String>,
}

impl CsvColumn {
    /// A column with the given identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// Human-readable label for a column.
///
/// The `csv.<id>` translation is used when present, otherwise the raw id.
/// Underscores become spaces and the first character is upper-cased.
///
/// # Errors
///
/// Returns [`Error::InvalidColumn`] if the column has no identifier.
pub fn column_label(column: &CsvColumn, translator: &impl Translator) -> Result<String> {
    let id = column.id.as_deref().ok_or(Error::InvalidColumn)?;
    let label = translator.translate(CSV_NAMESPACE, id).unwrap_or(id);
    Ok(ucfirst(&label.replace('_', " ")))
}

/// Label for a column, or the localized notice when it cannot be resolved.
#[must_use]
pub fn column_label_or_notice(
    column: &CsvColumn,
    translator: &impl Translator,
    messages: &Messages,
) -> String {
    column_label(column, translator).unwrap_or_else(|_| messages.invalid_column.to_string())
}
