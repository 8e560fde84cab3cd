use crate::matcher::join_by_key;
use crate::model::{
    Comparison, ComparisonRow, ComparisonSummary, ExcludedRecord, ExclusionReason, PeriodResult,
    PeriodRole, PeriodSummary, Record,
};

/// Round to two decimal places, ties to even.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round_ties_even() / 100.0
}

/// Compare two extracted periods.
///
/// Funds present in only one period are excluded as not comparable on that
/// side. Funds present in both are compared only when both values are
/// non-zero; each side that holds a zero reports it in its own excluded table.
/// Rows are sorted by change percent, highest first; ties keep join order.
pub fn compare(latest: &PeriodResult, past: &PeriodResult) -> Comparison {
    let joined = join_by_key(&latest.eligible, &past.eligible);

    let mut rows = Vec::with_capacity(joined.matched.len());
    let mut latest_zero = Vec::new();
    let mut past_zero = Vec::new();

    for pair in joined.matched {
        let latest_is_zero = pair.latest.value == 0.0;
        let past_is_zero = pair.past.value == 0.0;

        if latest_is_zero {
            latest_zero.push(ExcludedRecord::new(pair.latest.clone(), ExclusionReason::ZeroValue));
        }
        if past_is_zero {
            past_zero.push(ExcludedRecord::new(pair.past.clone(), ExclusionReason::ZeroValue));
        }
        if latest_is_zero || past_is_zero {
            continue;
        }

        let change = pair.latest.value - pair.past.value;
        rows.push(ComparisonRow {
            name: pair.latest.name,
            latest_value: pair.latest.value,
            past_value: pair.past.value,
            change,
            change_percent: round2(change / pair.past.value * 100.0),
        });
    }

    rows.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));

    let not_comparable = |records: Vec<Record>| -> Vec<ExcludedRecord> {
        records
            .into_iter()
            .map(|r| ExcludedRecord::new(r, ExclusionReason::NotComparable))
            .collect()
    };

    let mut latest_excluded = latest.excluded.clone();
    latest_excluded.extend(latest_zero);
    latest_excluded.extend(not_comparable(joined.latest_only));

    let mut past_excluded = past.excluded.clone();
    past_excluded.extend(past_zero);
    past_excluded.extend(not_comparable(joined.past_only));

    let summary = ComparisonSummary {
        latest: period_summary(PeriodRole::Latest, latest, rows.len(), latest_excluded.len()),
        past: period_summary(PeriodRole::Past, past, rows.len(), past_excluded.len()),
    };

    Comparison { rows, latest_excluded, past_excluded, summary }
}

fn period_summary(
    role: PeriodRole,
    period: &PeriodResult,
    included: usize,
    excluded: usize,
) -> PeriodSummary {
    PeriodSummary {
        role,
        total_raw: period.total_raw,
        included,
        excluded,
        dropped: period.dropped,
    }
}
