//! Writing a chart to disk for static publishing.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::chart::ChartResult;

/// Pretty JSON with four-space indentation.
pub fn to_pretty_json(result: &ChartResult) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    result.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Writes `result` to `path`, creating missing parent directories.
pub fn write_chart_json(result: &ChartResult, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = to_pretty_json(result)?;
    let mut file = fs::File::create(path)?;
    file.write_all(&json)?;
    file.write_all(b"\n")?;
    info!("chart written to {}", path.display());
    Ok(())
}
