// Excel period import (calamine) and report export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook, open_workbook_auto, Data, Range, Reader, Xlsx};
use navrecon::{ReconError, ReconReport};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use crate::report::report_tables;
use crate::table::{Cell, Grid};

/// Import one sheet of a workbook (xlsx, xlsm, xls, xlsb, ods) into a grid.
///
/// `sheet` is used when present in the workbook, otherwise the first sheet is
/// read. For xlsx/xlsm, merged regions are flattened so every covered cell
/// carries the region's value.
pub fn import(path: &Path, sheet: &str) -> Result<Grid, ReconError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if ext == "xlsx" || ext == "xlsm" {
        import_xlsx(path, sheet)
    } else {
        import_other(path, sheet)
    }
}

fn import_xlsx(path: &Path, sheet: &str) -> Result<Grid, ReconError> {
    let mut workbook: Xlsx<_> = open_workbook(path)
        .map_err(|e| ReconError::Io(format!("Failed to open Excel file: {e}")))?;
    let sheet_name = pick_sheet(&workbook.sheet_names(), sheet)?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::Io(format!("Failed to read sheet '{sheet_name}': {e}")))?;
    let mut grid = grid_from_range(&range);

    let merges = match workbook.worksheet_merge_cells(&sheet_name) {
        Some(Ok(dims)) => dims,
        Some(Err(e)) => {
            return Err(ReconError::Io(format!(
                "Failed to read merged cells of '{sheet_name}': {e}"
            )))
        }
        None => Vec::new(),
    };
    let regions: Vec<_> = merges
        .iter()
        .map(|d| {
            (
                (d.start.0 as usize, d.start.1 as usize),
                (d.end.0 as usize, d.end.1 as usize),
            )
        })
        .collect();
    if !regions.is_empty() {
        log::debug!("'{sheet_name}': flattening {} merged regions", regions.len());
    }
    grid.flatten_merges(&regions);

    Ok(grid)
}

fn import_other(path: &Path, sheet: &str) -> Result<Grid, ReconError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ReconError::Io(format!("Failed to open Excel file: {e}")))?;
    let sheet_name = pick_sheet(&workbook.sheet_names(), sheet)?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ReconError::Io(format!("Failed to read sheet '{sheet_name}': {e}")))?;
    Ok(grid_from_range(&range))
}

fn pick_sheet(names: &[String], wanted: &str) -> Result<String, ReconError> {
    if let Some(name) = names.iter().find(|n| n.as_str() == wanted) {
        return Ok(name.clone());
    }
    match names.first() {
        Some(first) => {
            log::warn!("sheet '{wanted}' not found, reading '{first}'");
            Ok(first.clone())
        }
        None => Err(ReconError::Io("Excel file contains no sheets".into())),
    }
}

/// Place range cells at their absolute sheet positions so merged-region
/// coordinates line up.
fn grid_from_range(range: &Range<Data>) -> Grid {
    let mut grid = Grid::default();
    let Some((start_row, start_col)) = range.start() else {
        return grid;
    };

    for (row_idx, row) in range.rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            let cell = cell_from_data(cell);
            if cell != Cell::Empty {
                grid.set(start_row as usize + row_idx, start_col as usize + col_idx, cell);
            }
        }
    }
    grid
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => {
            if s.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.into()),
        // Error cells (#N/A, #DIV/0!) carry no value.
        Data::Error(_) => Cell::Empty,
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Write a comparison run as a four-sheet workbook.
pub fn export_report(report: &ReconReport, path: &Path) -> Result<(), ReconError> {
    let mut workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();
    let percent_format = Format::new().set_num_format("0.00");

    for table in report_tables(report) {
        let worksheet = workbook
            .add_worksheet()
            .set_name(table.sheet)
            .map_err(|e| ReconError::Io(format!("Failed to create sheet '{}': {e}", table.sheet)))?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| ReconError::Io(format!("Failed to write header: {e}")))?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            // rust_xlsxwriter uses 0-based row/col as u32/u16
            let r = row_idx as u32 + 1;
            for (col_idx, cell) in row.iter().enumerate() {
                let c = col_idx as u16;
                let written = match cell {
                    Cell::Empty => continue,
                    Cell::Text(s) => worksheet.write_string(r, c, s.as_str()),
                    Cell::Number(n) if table.headers.get(col_idx) == Some(&"Change %") => {
                        worksheet.write_number_with_format(r, c, *n, &percent_format)
                    }
                    Cell::Number(n) => worksheet.write_number(r, c, *n),
                };
                written.map_err(|e| ReconError::Io(format!("Failed to write cell: {e}")))?;
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| ReconError::Io(format!("Failed to save XLSX file: {e}")))?;
    Ok(())
}
