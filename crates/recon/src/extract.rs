use std::collections::HashMap;

use crate::classify::classify;
use crate::config::RuleSet;
use crate::model::{ExcludedRecord, ExclusionReason, PeriodResult, RawRecord, Record};
use crate::normalize::base_scheme;
use crate::select::select_variant;

/// Records sharing a base scheme, keyed in first-encounter order.
#[derive(Debug, Default)]
pub struct SchemeGroups {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<Record>)>,
}

impl SchemeGroups {
    pub fn push(&mut self, base: String, record: Record) {
        match self.index.get(&base) {
            Some(&i) => self.groups[i].1.push(record),
            None => {
                self.index.insert(base.clone(), self.groups.len());
                self.groups.push((base, vec![record]));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn into_groups(self) -> Vec<(String, Vec<Record>)> {
        self.groups
    }
}

/// Group eligible records by base scheme.
pub fn group_by_base(records: Vec<Record>, rules: &RuleSet) -> SchemeGroups {
    let mut groups = SchemeGroups::default();
    for record in records {
        let base = base_scheme(&record.name, rules);
        groups.push(base, record);
    }
    groups
}

/// Coerce values, drop unusable rows, exclude by keyword, then keep one
/// variant per base scheme.
///
/// `total_raw` counts rows that survived coercion, so
/// `eligible.len() + excluded.len() == total_raw` always holds.
pub fn extract(raw: &[RawRecord], rules: &RuleSet) -> PeriodResult {
    let records: Vec<Record> = raw
        .iter()
        .filter(|r| !r.name.trim().is_empty())
        .filter_map(|r| r.value.to_number().map(|v| Record::new(r.name.clone(), v)))
        .collect();

    let total_raw = records.len();
    let dropped = raw.len() - total_raw;

    let mut excluded = Vec::new();
    let mut eligible_in = Vec::new();
    for record in records {
        match classify(&record.name, rules) {
            Some(reason) => excluded.push(ExcludedRecord::new(record, reason)),
            None => eligible_in.push(record),
        }
    }
    let keyword_excluded = excluded.len();

    let groups = group_by_base(eligible_in, rules);
    let group_count = groups.len();

    let mut eligible = Vec::with_capacity(group_count);
    let mut variant_excluded = Vec::new();
    for (base, group) in groups.into_groups() {
        let Some(selection) = select_variant(group, rules) else {
            continue;
        };
        if !selection.losers.is_empty() {
            log::debug!(
                "base '{base}': kept '{}' (rung {:?}), dropped {} variant(s)",
                selection.winner.name,
                selection.rung,
                selection.losers.len(),
            );
        }
        eligible.push(selection.winner);
        variant_excluded.extend(
            selection
                .losers
                .into_iter()
                .map(|r| ExcludedRecord::new(r, ExclusionReason::VariantSelection)),
        );
    }
    excluded.extend(variant_excluded);

    log::debug!(
        "extracted {} eligible from {} rows ({} dropped, {} keyword-excluded, {} variant-excluded)",
        eligible.len(),
        raw.len(),
        dropped,
        keyword_excluded,
        excluded.len() - keyword_excluded,
    );

    PeriodResult { eligible, excluded, total_raw, dropped }
}
