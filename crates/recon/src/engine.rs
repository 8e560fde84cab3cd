use crate::compare::compare;
use crate::config::RuleSet;
use crate::extract::extract;
use crate::model::{PeriodResult, RawRecord, ReconMeta, ReconReport};

/// An extracted period plus the label it is reported under (usually the
/// source file stem).
#[derive(Debug, Clone)]
pub struct LabeledPeriod {
    pub label: String,
    pub result: PeriodResult,
}

/// Extract one period's raw rows under a label.
pub fn extract_period(label: &str, raw: &[RawRecord], rules: &RuleSet) -> LabeledPeriod {
    let result = extract(raw, rules);
    log::info!(
        "period '{label}': {} rows read, {} numeric, {} eligible, {} excluded",
        raw.len(),
        result.total_raw,
        result.eligible.len(),
        result.excluded.len(),
    );
    LabeledPeriod { label: label.to_string(), result }
}

/// Compare an extracted latest period against one past period.
///
/// The latest period is borrowed so a single extraction serves every past
/// period in a multi-period run.
pub fn run(latest: &LabeledPeriod, past: &LabeledPeriod) -> ReconReport {
    let comparison = compare(&latest.result, &past.result);
    log::info!(
        "'{}' vs '{}': {} comparable, {} latest excluded, {} past excluded",
        latest.label,
        past.label,
        comparison.rows.len(),
        comparison.latest_excluded.len(),
        comparison.past_excluded.len(),
    );

    ReconReport {
        meta: ReconMeta {
            latest_label: latest.label.clone(),
            past_label: past.label.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        comparison,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleSet {
        RuleSet::new(
            vec!["DIRECT PLAN".into(), "REGULAR PLAN".into()],
            vec!["ETF".into()],
            vec![vec!["DIRECT".into()]],
        )
        .unwrap()
    }

    #[test]
    fn end_to_end() {
        let rules = rules();
        let latest = extract_period(
            "Latest",
            &[
                RawRecord::new("ABC Fund - Direct Plan", 120.0),
                RawRecord::new("ABC Fund - Regular Plan", 110.0),
                RawRecord::new("Gold ETF", 50.0),
            ],
            &rules,
        );
        let past = extract_period(
            "Past1",
            &[
                RawRecord::new("ABC Fund \u{2013} Direct Plan", 100.0),
                RawRecord::new("ABC Fund - Regular Plan", 95.0),
            ],
            &rules,
        );

        let report = run(&latest, &past);
        assert_eq!(report.meta.latest_label, "Latest");
        assert_eq!(report.meta.past_label, "Past1");
        assert_eq!(report.comparison.rows.len(), 1);
        assert_eq!(report.comparison.rows[0].change_percent, 20.0);
        // Regular variant + ETF on latest side, Regular variant on past side.
        assert_eq!(report.comparison.latest_excluded.len(), 2);
        assert_eq!(report.comparison.past_excluded.len(), 1);
        assert_eq!(report.comparison.summary.latest.total_raw, 3);
        assert_eq!(report.comparison.summary.past.total_raw, 2);
    }

    #[test]
    fn report_serializes() {
        let rules = rules();
        let latest = extract_period("L", &[RawRecord::new("A", 2.0)], &rules);
        let past = extract_period("P", &[RawRecord::new("A", 1.0)], &rules);
        let report = run(&latest, &past);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["meta"]["latest_label"], "L");
        assert_eq!(json["rows"][0]["change_percent"], 100.0);
        assert_eq!(json["summary"]["latest"]["role"], "latest");
    }
}
