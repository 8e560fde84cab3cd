// Period file readers and report writers

pub mod csv;
pub mod json;
pub mod report;
pub mod table;
pub mod xlsx;

use std::path::{Path, PathBuf};

use navrecon::{RawRecord, ReconError, ReconReport};

pub use report::report_stem;
pub use table::TableLayout;

/// Output format for a comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// One workbook, four sheets.
    Xlsx,
    Json,
    /// A directory holding one CSV per table.
    Csv,
}

/// Period label for a file: its stem, e.g. `Past1` for `Past1.xlsx`.
pub fn period_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("period")
        .to_string()
}

/// Read one period file into raw name/value records.
///
/// Dispatches on extension: `.csv` (sniffed delimiter), `.tsv`, and the
/// workbook formats calamine understands.
pub fn read_period(path: &Path, layout: &TableLayout) -> Result<Vec<RawRecord>, ReconError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let grid = match ext.as_str() {
        "csv" => csv::import(path)?,
        "tsv" => csv::import_tsv(path)?,
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => xlsx::import(path, &layout.sheet)?,
        other => {
            return Err(ReconError::Io(format!(
                "unsupported file type '.{other}' for {}",
                path.display()
            )))
        }
    };

    let label = period_label(path);
    let records = table::records_from_grid(&label, &grid, layout)?;
    log::info!("read {} rows from {}", records.len(), path.display());
    Ok(records)
}

/// Write a report into `out_dir` and return the path written.
pub fn write_report(
    report: &ReconReport,
    out_dir: &Path,
    format: ReportFormat,
) -> Result<PathBuf, ReconError> {
    std::fs::create_dir_all(out_dir)
        .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", out_dir.display())))?;
    let stem = report_stem(report);

    let path = match format {
        ReportFormat::Xlsx => {
            let path = out_dir.join(format!("{stem}.xlsx"));
            xlsx::export_report(report, &path)?;
            path
        }
        ReportFormat::Json => {
            let path = out_dir.join(format!("{stem}.json"));
            json::export(report, &path)?;
            path
        }
        ReportFormat::Csv => {
            let dir = out_dir.join(&stem);
            std::fs::create_dir_all(&dir)
                .map_err(|e| ReconError::Io(format!("cannot create {}: {e}", dir.display())))?;
            for table in report::report_tables(report) {
                csv::export_table(&table, &dir.join(format!("{}.csv", table.file_stem)))?;
            }
            dir
        }
    };

    log::info!("wrote {}", path.display());
    Ok(path)
}
