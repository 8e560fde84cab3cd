use crate::config::RuleSet;
use crate::model::ExclusionReason;

/// Check a name against the exclusion keywords in rule order.
///
/// Returns the reason citing the first keyword found, or `None` if the name
/// is eligible.
pub fn classify(name: &str, rules: &RuleSet) -> Option<ExclusionReason> {
    let upper = name.to_uppercase();
    rules
        .exclusion_keywords()
        .iter()
        .find(|k| upper.contains(k.as_str()))
        .map(|k| ExclusionReason::ContainsKeyword { keyword: k.clone() })
}
