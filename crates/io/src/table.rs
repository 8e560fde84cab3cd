// Tabular grid shared by the CSV and Excel readers, plus header detection
// and column mapping into raw period records.

use navrecon::{RawRecord, RawValue, ReconError};

/// A single cell as read from a CSV or workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format!("{n}"),
        }
    }

    fn to_raw_value(&self) -> RawValue {
        match self {
            Self::Empty => RawValue::Empty,
            Self::Text(s) => RawValue::from(s.as_str()),
            Self::Number(n) => RawValue::Number(*n),
        }
    }
}

static EMPTY: Cell = Cell::Empty;

/// Dense row-major grid. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn get(&self, row: usize, col: usize) -> &Cell {
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let r = &mut self.rows[row];
        if r.len() <= col {
            r.resize(col + 1, Cell::Empty);
        }
        r[col] = cell;
    }

    /// Copy each merged region's top-left value into every cell it covers.
    /// Regions are inclusive `(start_row, start_col)..=(end_row, end_col)`.
    pub fn flatten_merges(&mut self, regions: &[((usize, usize), (usize, usize))]) {
        for &((sr, sc), (er, ec)) in regions {
            let value = self.get(sr, sc).clone();
            for r in sr..=er {
                for c in sc..=ec {
                    self.set(r, c, value.clone());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Where the name/value table lives inside a period file.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// Workbook sheet; falls back to the first sheet when absent.
    pub sheet: String,
    /// Text that identifies the header row (case-insensitive substring).
    pub header_marker: String,
    pub name_column: String,
    pub value_column: String,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            sheet: "NAV Data".into(),
            header_marker: "NAV Name".into(),
            name_column: "NAV Name".into(),
            value_column: "Net Asset Value".into(),
        }
    }
}

/// Turn a grid into raw records: drop fully blank rows, find the header row,
/// map the name and value columns, and emit every row below the header.
pub fn records_from_grid(
    period: &str,
    grid: &Grid,
    layout: &TableLayout,
) -> Result<Vec<RawRecord>, ReconError> {
    let rows: Vec<&Vec<Cell>> = grid
        .rows
        .iter()
        .filter(|r| !r.iter().all(Cell::is_blank))
        .collect();

    let marker = layout.header_marker.to_lowercase();
    let header_idx = rows
        .iter()
        .position(|r| r.iter().any(|c| c.as_text().to_lowercase().contains(&marker)))
        .ok_or_else(|| ReconError::MissingColumn {
            period: period.into(),
            column: layout.header_marker.clone(),
        })?;

    let header = rows[header_idx];
    let col = |name: &str| -> Result<usize, ReconError> {
        header
            .iter()
            .position(|c| c.as_text().trim().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ReconError::MissingColumn {
                period: period.into(),
                column: name.into(),
            })
    };
    let name_idx = col(&layout.name_column)?;
    let value_idx = col(&layout.value_column)?;

    let records: Vec<RawRecord> = rows[header_idx + 1..]
        .iter()
        .map(|r| {
            let name = r.get(name_idx).map(Cell::as_text).unwrap_or_default();
            let value = r.get(value_idx).map(Cell::to_raw_value).unwrap_or(RawValue::Empty);
            RawRecord { name: name.trim().to_string(), value }
        })
        .collect();

    log::debug!(
        "period '{period}': header at data row {header_idx}, {} records",
        records.len()
    );
    Ok(records)
}
