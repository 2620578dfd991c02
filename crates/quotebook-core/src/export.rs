//! Quote export and import helpers shared by every front end.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::models::{decode_quote_list, Quote};

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Acknowledgment shown after a successful import.
pub const IMPORT_SUCCESS_MESSAGE: &str = "Quotes imported successfully!";

/// Render quotes as pretty-printed JSON (2-space indent).
pub fn render_json_export(quotes: &[Quote]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(quotes)
}

/// Decode an imported file body into quotes.
pub fn parse_import(raw: &str) -> Result<Vec<Quote>> {
    decode_quote_list(raw, "import")
}

/// Resolve where an export lands.
///
/// A directory target receives `quotes.json`; any other path is used as is.
/// With no target, the export goes to `quotes.json` in the working directory.
pub fn resolve_export_path(target: Option<&Path>) -> PathBuf {
    match target {
        Some(path) if path.is_dir() => path.join(EXPORT_FILE_NAME),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(EXPORT_FILE_NAME),
    }
}

/// Write the export for `quotes` and return the final path.
///
/// The body is staged in a temp file next to the destination and persisted
/// over it; an unpersisted temp file is deleted when dropped.
pub fn export_to_path(quotes: &[Quote], target: Option<&Path>) -> Result<PathBuf> {
    let output_path = resolve_export_path(target);
    let rendered = render_json_export(quotes)?;

    let parent = output_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(rendered.as_bytes())?;
    staged.flush()?;
    staged
        .persist(&output_path)
        .map_err(|error| Error::Io(error.error))?;

    tracing::info!("Exported {} quotes to {}", quotes.len(), output_path.display());
    Ok(output_path)
}
