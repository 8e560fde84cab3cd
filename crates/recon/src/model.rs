use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A cell value as the tabular reader saw it, before numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Empty,
}

impl RawValue {
    /// Coerce to a finite number. Text is trimmed and parsed; anything that
    /// does not parse, or parses to NaN/infinity, is `None`.
    pub fn to_number(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Empty => return None,
        };
        n.is_finite().then_some(n)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        if s.trim().is_empty() {
            Self::Empty
        } else {
            Self::Text(s.to_string())
        }
    }
}

/// One row of a period's source table as read.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub name: String,
    pub value: RawValue,
}

impl RawRecord {
    pub fn new(name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// A row that survived numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub value: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self { name: name.into(), value }
    }
}

// ---------------------------------------------------------------------------
// Exclusion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExclusionReason {
    ContainsKeyword { keyword: String },
    ZeroValue,
    NotComparable,
    VariantSelection,
}

impl std::fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainsKeyword { keyword } => write!(f, "Excluded by rule: contains {keyword}"),
            Self::ZeroValue => write!(f, "Excluded: zero NAV"),
            Self::NotComparable => write!(f, "Excluded: not comparable"),
            Self::VariantSelection => write!(f, "Excluded: variant selection"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedRecord {
    #[serde(flatten)]
    pub record: Record,
    pub reason: ExclusionReason,
}

impl ExcludedRecord {
    pub fn new(record: Record, reason: ExclusionReason) -> Self {
        Self { record, reason }
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct PeriodResult {
    /// One record per base scheme, in first-encounter order.
    pub eligible: Vec<Record>,
    pub excluded: Vec<ExcludedRecord>,
    /// Rows left after numeric coercion, before exclusion.
    pub total_raw: usize,
    /// Rows dropped by numeric coercion (blank name, missing or non-numeric value).
    pub dropped: usize,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub latest_value: f64,
    pub past_value: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodRole {
    Latest,
    Past,
}

impl std::fmt::Display for PeriodRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "Latest"),
            Self::Past => write!(f, "Past"),
        }
    }
}

/// Reconciliation counts for one side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub role: PeriodRole,
    pub total_raw: usize,
    pub included: usize,
    pub excluded: usize,
    pub dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonSummary {
    pub latest: PeriodSummary,
    pub past: PeriodSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
    pub latest_excluded: Vec<ExcludedRecord>,
    pub past_excluded: Vec<ExcludedRecord>,
    pub summary: ComparisonSummary,
}

// ---------------------------------------------------------------------------
// Run output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub latest_label: String,
    pub past_label: String,
    pub engine_version: String,
    pub run_at: String,
}

/// One latest-vs-past comparison run, ready for a report writer.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    #[serde(flatten)]
    pub comparison: Comparison,
}
