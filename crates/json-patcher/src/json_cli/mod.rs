//! Core logic behind the `json-patch` binary.

use serde_json::Value;

use crate::json_patch::codec::json::from_json_patch;
use crate::json_patch::{apply_patch, PatchError, PatchOptions};

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum CliError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Patch(PatchError),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e)    => write!(f, "{e}"),
            CliError::Json(e)  => write!(f, "invalid JSON: {e}"),
            CliError::Patch(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self { CliError::Io(e) }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self { CliError::Json(e) }
}

impl From<PatchError> for CliError {
    fn from(e: PatchError) -> Self { CliError::Patch(e) }
}

// ── json-patch ────────────────────────────────────────────────────────────

/// Apply a JSON Patch to a document.
///
/// `doc_json`: the document as a JSON string.
/// `patch_json`: the patch operations as a JSON array string.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn apply_json_patch(
    doc_json: &str,
    patch_json: &str,
    options: &PatchOptions,
) -> Result<String, CliError> {
    let doc: Value = serde_json::from_str(doc_json)?;
    let ops_raw: Value = serde_json::from_str(patch_json)?;
    let ops = from_json_patch(&ops_raw)?;
    log::debug!("applying {} operation(s) with on_error={}", ops.len(), options.on_error);
    let result = apply_patch(&doc, &ops, options)?;
    Ok(serde_json::to_string_pretty(&result)?)
}
