use std::path::PathBuf;

use navrecon::model::{ExclusionReason, RawValue};
use navrecon::{extract_period, run, LabeledPeriod, RawRecord, ReconReport, RuleSet};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_rules() -> RuleSet {
    RuleSet::load(&fixtures_dir().join("scheme_rules.json")).unwrap()
}

fn latest_rows() -> Vec<RawRecord> {
    vec![
        RawRecord::new("HDFC Flexi Cap Fund - Direct Plan - Growth Option", 1850.50),
        RawRecord::new("HDFC Flexi Cap Fund - Regular Plan - Growth Option", 1700.25),
        RawRecord::new("HDFC Flexi Cap Fund - Direct Plan - IDCW Option", 80.10),
        RawRecord::new("Axis Bluechip Fund - Regular Plan - Growth", 56.00),
        RawRecord::new("Axis Bluechip Fund - Regular Plan - IDCW", 20.00),
        RawRecord::new("Nippon India ETF Nifty 50 BeES", 250.0),
        RawRecord::new("SBI Small Cap Fund - Direct Plan - Growth", 0.0),
        RawRecord::new("Kotak New Fund - Direct Plan - Growth", 10.0),
        RawRecord::new("Broken Fund - Direct Plan - Growth", RawValue::Text("N.A.".into())),
    ]
}

fn past_rows() -> Vec<RawRecord> {
    vec![
        RawRecord::new("HDFC Flexi Cap Fund \u{2013} Direct Plan \u{2013} Growth Option", 1682.27),
        RawRecord::new("HDFC Flexi Cap Fund - Regular Plan - Growth Option", 1560.0),
        RawRecord::new("Axis Bluechip Fund - Regular Plan - Growth", 50.00),
        RawRecord::new("SBI Small Cap Fund - Direct Plan - Growth", 150.0),
        RawRecord::new("ICICI Closed Fund - Direct Plan - Growth", 12.0),
        RawRecord::new("Bharat Bond FOF", 11.0),
    ]
}

fn extract_both(rules: &RuleSet) -> (LabeledPeriod, LabeledPeriod) {
    (
        extract_period("Latest", &latest_rows(), rules),
        extract_period("Past1", &past_rows(), rules),
    )
}

fn load_and_run() -> ReconReport {
    let rules = load_rules();
    let (latest, past) = extract_both(&rules);
    run(&latest, &past)
}

fn reasons_for<'a>(excluded: &'a [navrecon::ExcludedRecord], name: &str) -> Vec<&'a ExclusionReason> {
    excluded.iter().filter(|e| e.record.name == name).map(|e| &e.reason).collect()
}

// -------------------------------------------------------------------------
// Extraction
// -------------------------------------------------------------------------

#[test]
fn latest_extraction_counts() {
    let rules = load_rules();
    let (latest, _) = extract_both(&rules);
    let r = &latest.result;
    assert_eq!(r.total_raw, 8);
    assert_eq!(r.dropped, 1);
    assert_eq!(r.eligible.len(), 4);
    assert_eq!(r.excluded.len(), 4);

    let eligible: Vec<_> = r.eligible.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        eligible,
        vec![
            "HDFC Flexi Cap Fund - Direct Plan - Growth Option",
            "Axis Bluechip Fund - Regular Plan - Growth",
            "SBI Small Cap Fund - Direct Plan - Growth",
            "Kotak New Fund - Direct Plan - Growth",
        ]
    );
}

#[test]
fn ladder_prefers_growth_when_no_direct_plan() {
    let rules = load_rules();
    let (latest, _) = extract_both(&rules);
    let reasons = reasons_for(&latest.result.excluded, "Axis Bluechip Fund - Regular Plan - IDCW");
    assert_eq!(reasons, vec![&ExclusionReason::VariantSelection]);
}

#[test]
fn json_and_toml_rules_give_identical_results() {
    let json_rules = load_rules();
    let toml_rules = RuleSet::load(&fixtures_dir().join("scheme_rules.toml")).unwrap();
    let a = extract_period("L", &latest_rows(), &json_rules);
    let b = extract_period("L", &latest_rows(), &toml_rules);
    assert_eq!(a.result.eligible, b.result.eligible);
    assert_eq!(a.result.excluded, b.result.excluded);
}

// -------------------------------------------------------------------------
// Comparison
// -------------------------------------------------------------------------

#[test]
fn comparison_rows() {
    let report = load_and_run();
    let rows = &report.comparison.rows;
    assert_eq!(rows.len(), 2);

    // Sorted by change percent, highest first.
    assert_eq!(rows[0].name, "Axis Bluechip Fund - Regular Plan - Growth");
    assert_eq!(rows[0].change, 6.0);
    assert_eq!(rows[0].change_percent, 12.0);

    assert_eq!(rows[1].name, "HDFC Flexi Cap Fund - Direct Plan - Growth Option");
    assert!((rows[1].change - 168.23).abs() < 1e-9);
    assert_eq!(rows[1].change_percent, 10.0);

    for row in rows {
        assert_ne!(row.past_value, 0.0);
        assert_ne!(row.latest_value, 0.0);
    }
}

#[test]
fn latest_excluded_table() {
    let report = load_and_run();
    let ex = &report.comparison.latest_excluded;
    assert_eq!(ex.len(), 6);
    assert_eq!(
        reasons_for(ex, "Nippon India ETF Nifty 50 BeES"),
        vec![&ExclusionReason::ContainsKeyword { keyword: "ETF".into() }]
    );
    assert_eq!(
        reasons_for(ex, "SBI Small Cap Fund - Direct Plan - Growth"),
        vec![&ExclusionReason::ZeroValue]
    );
    assert_eq!(
        reasons_for(ex, "Kotak New Fund - Direct Plan - Growth"),
        vec![&ExclusionReason::NotComparable]
    );
    // Dropped rows never reach the excluded table.
    assert!(reasons_for(ex, "Broken Fund - Direct Plan - Growth").is_empty());
}

#[test]
fn past_excluded_table() {
    let report = load_and_run();
    let ex = &report.comparison.past_excluded;
    assert_eq!(ex.len(), 3);
    assert_eq!(
        reasons_for(ex, "Bharat Bond FOF"),
        vec![&ExclusionReason::ContainsKeyword { keyword: "FOF".into() }]
    );
    assert_eq!(
        reasons_for(ex, "HDFC Flexi Cap Fund - Regular Plan - Growth Option"),
        vec![&ExclusionReason::VariantSelection]
    );
    assert_eq!(
        reasons_for(ex, "ICICI Closed Fund - Direct Plan - Growth"),
        vec![&ExclusionReason::NotComparable]
    );
    // Past side of a latest-zero fund is not excluded on the past side.
    assert!(reasons_for(ex, "SBI Small Cap Fund - Direct Plan - Growth").is_empty());
}

#[test]
fn reconciliation_summary() {
    let report = load_and_run();
    let s = &report.comparison.summary;
    assert_eq!(s.latest.total_raw, 8);
    assert_eq!(s.latest.included, 2);
    assert_eq!(s.latest.excluded, 6);
    assert_eq!(s.latest.dropped, 1);
    assert_eq!(s.past.total_raw, 6);
    assert_eq!(s.past.included, 2);
    assert_eq!(s.past.excluded, 3);
    assert_eq!(s.past.dropped, 0);
}

#[test]
fn latest_is_shared_across_past_periods() {
    let rules = load_rules();
    let latest = extract_period("Latest", &latest_rows(), &rules);
    let past1 = extract_period("Past1", &past_rows(), &rules);
    let past2 = extract_period(
        "Past2",
        &[RawRecord::new("Kotak New Fund - Direct Plan - Growth", 8.0)],
        &rules,
    );

    let r1 = run(&latest, &past1);
    let r2 = run(&latest, &past2);
    assert_eq!(r1.meta.past_label, "Past1");
    assert_eq!(r2.meta.past_label, "Past2");
    assert_eq!(r2.comparison.rows.len(), 1);
    assert_eq!(r2.comparison.rows[0].change_percent, 25.0);
    // The first run leaves the shared latest period untouched.
    assert_eq!(latest.result.eligible.len(), 4);
}

#[test]
fn empty_periods() {
    let rules = load_rules();
    let latest = extract_period("Latest", &[], &rules);
    let past = extract_period("Past", &[], &rules);
    let report = run(&latest, &past);
    assert!(report.comparison.rows.is_empty());
    assert!(report.comparison.latest_excluded.is_empty());
    assert!(report.comparison.past_excluded.is_empty());
    assert_eq!(report.comparison.summary.latest.total_raw, 0);
}
