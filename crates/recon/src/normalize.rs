//! Scheme-name normalization.
//!
//! Three keys are derived from a raw fund name:
//! - [`normalize`]: uppercase, whitespace runs collapsed to one space, trimmed.
//! - [`join_key`]: `normalize` with en/em dashes unified to `-`. Used to join
//!   periods, so the same name typed with different dash glyphs still lines up.
//! - [`base_scheme`]: dashes blanked, `normalize`d, every configured remove-term
//!   stripped in rule order, then `normalize`d again. Variants of one fund
//!   (plan/option suffixes) collapse to the same base scheme.

use crate::config::RuleSet;

const DASHES: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

pub fn normalize(name: &str) -> String {
    name.to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn join_key(name: &str) -> String {
    let unified: String = name
        .chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect();
    normalize(&unified)
}

/// Blank out dash glyphs, then normalize.
pub fn clean_text(name: &str) -> String {
    let blanked: String = name
        .chars()
        .map(|c| if DASHES.contains(&c) { ' ' } else { c })
        .collect();
    normalize(&blanked)
}

pub fn base_scheme(name: &str, rules: &RuleSet) -> String {
    let mut s = clean_text(name);
    for term in rules.remove_terms() {
        s = s.replace(term.as_str(), "");
    }
    normalize(&s)
}
