use std::collections::{HashMap, HashSet};

use crate::model::Record;
use crate::normalize::join_key;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    pub key: String,
    pub latest: Record,
    pub past: Record,
}

#[derive(Debug, Default)]
pub struct JoinOutput {
    pub matched: Vec<MatchedPair>,
    pub latest_only: Vec<Record>,
    pub past_only: Vec<Record>,
}

/// Full outer join of two eligible sets on the normalized name key.
///
/// Matched pairs and latest-only records follow latest order; past-only
/// records follow past order. Keys are unique within an eligible set (one
/// record per base scheme); should a key repeat, the first occurrence joins
/// and later ones fall out as unmatched.
pub fn join_by_key(latest: &[Record], past: &[Record]) -> JoinOutput {
    let mut past_map: HashMap<String, &Record> = HashMap::new();
    for r in past {
        past_map.entry(join_key(&r.name)).or_insert(r);
    }

    let mut out = JoinOutput::default();
    let mut used: HashSet<String> = HashSet::new();

    for l in latest {
        let key = join_key(&l.name);
        match past_map.get(&key) {
            Some(p) if !used.contains(&key) => {
                used.insert(key.clone());
                out.matched.push(MatchedPair { key, latest: l.clone(), past: (*p).clone() });
            }
            _ => out.latest_only.push(l.clone()),
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    for p in past {
        let key = join_key(&p.name);
        let first = seen.insert(key.clone());
        if !first || !used.contains(&key) {
            out.past_only.push(p.clone());
        }
    }

    out
}
