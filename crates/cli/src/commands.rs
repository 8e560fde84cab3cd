//! `navrecon run | validate | inspect`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use navrecon::classify::classify;
use navrecon::normalize::{base_scheme, join_key};
use navrecon::{extract_period, run, ReconError, ReconReport, RuleSet};
use navrecon_io::{period_label, read_period, write_report, ReportFormat, TableLayout};

use crate::CliError;

pub struct RunArgs {
    pub rules: PathBuf,
    pub latest: PathBuf,
    pub past: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub format: ReportFormat,
    pub json: bool,
    pub layout: TableLayout,
}

fn load_rules(path: &Path) -> Result<RuleSet, CliError> {
    RuleSet::load(path).map_err(|e| {
        let err = CliError::rules(e.to_string());
        match e {
            ReconError::ConfigParse(_) => {
                err.with_hint("rule files are JSON (.json) or TOML (.toml), chosen by extension")
            }
            _ => err,
        }
    })
}

fn input_err(e: ReconError) -> CliError {
    match e {
        ReconError::MissingColumn { .. } => CliError::input(e.to_string())
            .with_hint("check --sheet, --header-marker, --name-column and --value-column"),
        _ => CliError::input(e.to_string()),
    }
}

/// Reports are named after the past file's stem, so two past files with the
/// same stem would overwrite each other.
fn check_distinct_past_labels(past: &[PathBuf]) -> Result<(), CliError> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for path in past {
        let label = period_label(path);
        if let Some(first) = seen.insert(label.clone(), path) {
            return Err(CliError::usage(format!(
                "past files {} and {} share the name '{label}'",
                first.display(),
                path.display()
            ))
            .with_hint("rename one of them; reports are named after the file stem"));
        }
    }
    Ok(())
}

pub fn cmd_run(args: RunArgs) -> Result<(), CliError> {
    check_distinct_past_labels(&args.past)?;
    let rules = load_rules(&args.rules)?;

    if !args.latest.exists() {
        return Err(CliError::input(format!(
            "latest file not found: {}",
            args.latest.display()
        )));
    }
    let latest_raw = read_period(&args.latest, &args.layout).map_err(input_err)?;
    let latest = extract_period(&period_label(&args.latest), &latest_raw, &rules);

    let mut reports: Vec<ReconReport> = Vec::with_capacity(args.past.len());
    for past_path in &args.past {
        if !past_path.exists() {
            log::warn!("past file not found, skipping: {}", past_path.display());
            eprintln!("warning: skipping missing past file {}", past_path.display());
            continue;
        }
        let past_raw = read_period(past_path, &args.layout).map_err(input_err)?;
        let past = extract_period(&period_label(past_path), &past_raw, &rules);

        let report = run(&latest, &past);
        let written = write_report(&report, &args.out_dir, args.format)
            .map_err(|e| CliError::output(e.to_string()))?;

        let c = &report.comparison;
        eprintln!(
            "{} vs {}: {} compared, {} excluded (latest), {} excluded (past) -> {}",
            report.meta.latest_label,
            report.meta.past_label,
            c.rows.len(),
            c.latest_excluded.len(),
            c.past_excluded.len(),
            written.display(),
        );
        reports.push(report);
    }

    if reports.is_empty() {
        return Err(CliError::input("no past files could be compared")
            .with_hint("every --past file was missing"));
    }

    if args.json {
        let json = navrecon_io::json::reports_to_string(&reports)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{json}");
    }

    Ok(())
}

pub fn cmd_validate(path: PathBuf) -> Result<(), CliError> {
    let rules = load_rules(&path)?;
    println!(
        "{}: ok ({} remove terms, {} exclusion keywords, {} ladder rungs)",
        path.display(),
        rules.remove_terms().len(),
        rules.exclusion_keywords().len(),
        rules.priority_ladder().len(),
    );
    Ok(())
}

pub fn cmd_inspect(path: PathBuf, names: Vec<String>, json: bool) -> Result<(), CliError> {
    let rules = load_rules(&path)?;

    let rows: Vec<serde_json::Value> = names
        .iter()
        .map(|name| {
            let verdict = classify(name, &rules);
            serde_json::json!({
                "name": name,
                "key": join_key(name),
                "base_scheme": base_scheme(name, &rules),
                "excluded": verdict.is_some(),
                "reason": verdict.map(|r| r.to_string()),
            })
        })
        .collect();

    if json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{out}");
        return Ok(());
    }

    for row in &rows {
        let status = row["reason"].as_str().unwrap_or("eligible");
        println!("{}", row["name"].as_str().unwrap_or_default());
        println!("  key:    {}", row["key"].as_str().unwrap_or_default());
        println!("  base:   {}", row["base_scheme"].as_str().unwrap_or_default());
        println!("  status: {status}");
    }
    Ok(())
}
