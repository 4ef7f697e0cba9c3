pub mod diff;
pub mod publish;
pub mod snapshot;

use pressroom_core::model::Document;
use serde::Serialize;
use std::path::Path;

/// Load a draft document from a JSON file
pub fn read_draft(path: &Path) -> Result<Document, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("Cannot read draft {}: {}", path.display(), e))?;
    let document = serde_json::from_str(&raw)
        .map_err(|e| format!("Invalid draft {}: {}", path.display(), e))?;
    Ok(document)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
