// Report tables: the four logical outputs of a comparison run, flattened
// into header + rows so any writer can render them.

use navrecon::model::{ExcludedRecord, PeriodSummary};
use navrecon::ReconReport;

use crate::table::Cell;

pub const SHEET_COMPARISON: &str = "NAV Comparison";
pub const SHEET_LATEST_EXCLUDED: &str = "Excluded_Schemes__Latest";
pub const SHEET_PAST_EXCLUDED: &str = "Excluded_Schemes__Past";
pub const SHEET_RECONCILIATION: &str = "Reconciliation";

#[derive(Debug, Clone)]
pub struct Table {
    /// Workbook sheet name.
    pub sheet: &'static str,
    /// File name stem when written as a standalone file.
    pub file_stem: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

/// File stem for a run's report, e.g. `NAV_Comparison_Latest_vs_Past1`.
pub fn report_stem(report: &ReconReport) -> String {
    format!(
        "NAV_Comparison_{}_vs_{}",
        sanitize(&report.meta.latest_label),
        sanitize(&report.meta.past_label)
    )
}

/// Keep alphanumerics, `-` and `_`; anything else becomes `_`.
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

pub fn report_tables(report: &ReconReport) -> Vec<Table> {
    let c = &report.comparison;
    vec![
        comparison_table(report),
        excluded_table(SHEET_LATEST_EXCLUDED, "excluded_latest", &c.latest_excluded),
        excluded_table(SHEET_PAST_EXCLUDED, "excluded_past", &c.past_excluded),
        reconciliation_table(report),
    ]
}

fn comparison_table(report: &ReconReport) -> Table {
    let rows = report
        .comparison
        .rows
        .iter()
        .map(|r| {
            vec![
                Cell::Text(r.name.clone()),
                Cell::Number(r.latest_value),
                Cell::Number(r.past_value),
                Cell::Number(r.change),
                Cell::Number(r.change_percent),
            ]
        })
        .collect();
    Table {
        sheet: SHEET_COMPARISON,
        file_stem: "nav_comparison",
        headers: vec!["Mutual Fund Name", "Latest NAV", "Past NAV", "Change", "Change %"],
        rows,
    }
}

fn excluded_table(sheet: &'static str, file_stem: &'static str, excluded: &[ExcludedRecord]) -> Table {
    let rows = excluded
        .iter()
        .map(|e| vec![Cell::Text(e.record.name.clone()), Cell::Text(e.reason.to_string())])
        .collect();
    Table {
        sheet,
        file_stem,
        headers: vec!["Mutual Fund Name", "Reason"],
        rows,
    }
}

fn reconciliation_table(report: &ReconReport) -> Table {
    let s = &report.comparison.summary;
    let mut rows = Vec::new();
    for period in [&s.latest, &s.past] {
        rows.extend(summary_rows(period));
    }
    Table {
        sheet: SHEET_RECONCILIATION,
        file_stem: "reconciliation",
        headers: vec!["File Type", "Category", "Count"],
        rows,
    }
}

fn summary_rows(p: &PeriodSummary) -> Vec<Vec<Cell>> {
    let role = p.role.to_string();
    [
        ("Total Raw", p.total_raw),
        ("Included in NAV Comparison", p.included),
        ("Excluded Schemes", p.excluded),
        ("Dropped (non-numeric NAV)", p.dropped),
    ]
    .into_iter()
    .map(|(category, count)| {
        vec![
            Cell::Text(role.clone()),
            Cell::Text(category.to_string()),
            Cell::Number(count as f64),
        ]
    })
    .collect()
}
