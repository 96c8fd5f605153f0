//! Output formatting settings.

use serde::{Deserialize, Serialize};

/// Separator and flattening configuration for rendered output.
///
/// Every field has a default (`,` separators, arrays kept bracketed), and the
/// struct deserializes from partial input, so hosts can load it from any serde
/// source before constructing a [`Renderer`](crate::Renderer):
///
/// ```
/// use rowmill::CsvSettings;
///
/// let settings: CsvSettings = serde_json::from_str(r#"{ "flatten_arrays": true }"#)?;
/// assert!(settings.flatten_arrays);
/// assert_eq!(settings.value_separator, ",");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    /// Separator between header cells.
    pub header_separator: String,
    /// Separator between value cells, including within joined sequences.
    pub value_separator: String,
    /// When `true`, scalar sequences spread into bare separated values (and
    /// their headers expand into indexed cells). When `false`, a sequence
    /// stays a single bracketed cell. Overridable per field via
    /// [`ColumnMeta::with_flatten`](crate::ColumnMeta::with_flatten).
    pub flatten_arrays: bool,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            header_separator: ",".to_string(),
            value_separator: ",".to_string(),
            flatten_arrays: false,
        }
    }
}
