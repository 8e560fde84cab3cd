// CSV/TSV period import and report table export

use std::io::Read;
use std::path::Path;

use navrecon::ReconError;

use crate::report::Table;
use crate::table::{Cell, Grid};

pub fn import(path: &Path) -> Result<Grid, ReconError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
}

pub fn import_tsv(path: &Path) -> Result<Grid, ReconError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
}

const SNIFF_LINES: usize = 10;

/// Pick the field delimiter for a period export.
///
/// Each candidate splits the first lines into rows; the width (>1 field) that
/// occurs most often scores `rows * width`. Title lines above the header carry
/// no delimiter, so the most common width is used rather than the first row's.
/// Ties go to the earlier candidate. Falls back to `,`.
fn sniff_delimiter(content: &str) -> u8 {
    let sample = content.lines().take(SNIFF_LINES).collect::<Vec<_>>().join("\n");

    let mut best = (0usize, b',');
    for delim in [b'\t', b';', b',', b'|'] {
        let widths = field_widths(&sample, delim);
        let score = widths
            .iter()
            .filter(|&&w| w > 1)
            .map(|&w| widths.iter().filter(|&&x| x == w).count() * w)
            .max()
            .unwrap_or(0);
        if score > best.0 {
            best = (score, delim);
        }
    }
    best.1
}

fn field_widths(sample: &str, delimiter: u8) -> Vec<usize> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes())
        .records()
        .map(|r| r.map(|r| r.len()).unwrap_or(1))
        .collect()
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, ReconError> {
    let mut file = std::fs::File::open(path)
        .map_err(|e| ReconError::Io(format!("cannot open {}: {e}", path.display())))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

fn import_from_string(content: &str, delimiter: u8) -> Result<Grid, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Grid::default();
    for result in reader.records() {
        let record = result.map_err(|e| ReconError::Io(e.to_string()))?;
        let row = record
            .iter()
            .map(|field| {
                let field = field.trim_start_matches('\u{feff}');
                if field.trim().is_empty() {
                    Cell::Empty
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        grid.rows.push(row);
    }
    Ok(grid)
}

/// Write one report table as CSV with a header row.
pub fn export_table(table: &Table, path: &Path) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", path.display())))?;

    writer
        .write_record(&table.headers)
        .map_err(|e| ReconError::Io(e.to_string()))?;
    for row in &table.rows {
        let fields: Vec<String> = row.iter().map(Cell::as_text).collect();
        writer
            .write_record(&fields)
            .map_err(|e| ReconError::Io(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
