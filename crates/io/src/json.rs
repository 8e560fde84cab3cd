// JSON report export

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use navrecon::{ReconError, ReconReport};

/// Pretty JSON array of reports, one per past period.
pub fn reports_to_string(reports: &[ReconReport]) -> Result<String, ReconError> {
    serde_json::to_string_pretty(reports).map_err(|e| ReconError::Io(e.to_string()))
}

pub fn export(report: &ReconReport, path: &Path) -> Result<(), ReconError> {
    let file = File::create(path)
        .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", path.display())))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, report).map_err(|e| ReconError::Io(e.to_string()))?;
    Ok(())
}
