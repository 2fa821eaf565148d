//! Bulk-import schema validation.
//!
//! Accepts externally supplied JSON and checks the shape the dataset expects:
//! a top-level list where every element is an object carrying `role` and
//! `content` text fields. Any additional fields ride along unchanged into
//! [`Record::extra`](crate::models::Record).
//!
//! Pairing (even count, alternating roles) is deliberately NOT checked here —
//! that rule belongs to the session layer, which applies it uniformly to
//! imported and fetched data alike.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::CurateError;
use crate::models::Record;

/// Validate a parsed JSON value as a list of records.
///
/// Fails with [`CurateError::InvalidImportSchema`] when the top-level value
/// is not a list, an element is not an object, or `role`/`content` are
/// missing or non-text. The whole batch is rejected on the first bad entry.
pub fn records_from_json(value: serde_json::Value) -> Result<Vec<Record>, CurateError> {
    let items = value.as_array().ok_or_else(|| {
        CurateError::InvalidImportSchema("top-level value must be a list of objects".to_string())
    })?;

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            CurateError::InvalidImportSchema(format!("entry {} is not an object", i + 1))
        })?;
        for field in ["role", "content"] {
            match obj.get(field) {
                Some(v) if v.is_string() => {}
                Some(_) => {
                    return Err(CurateError::InvalidImportSchema(format!(
                        "entry {}: '{}' must be a string",
                        i + 1,
                        field
                    )))
                }
                None => {
                    return Err(CurateError::InvalidImportSchema(format!(
                        "entry {} is missing required field '{}'",
                        i + 1,
                        field
                    )))
                }
            }
        }
        let record: Record = serde_json::from_value(item.clone()).map_err(|e| {
            CurateError::InvalidImportSchema(format!("entry {}: {}", i + 1, e))
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Read and validate a local JSON import file.
pub fn load_import_file(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file: {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(records_from_json(value)?)
}
