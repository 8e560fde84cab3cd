use crate::config::RuleSet;
use crate::model::Record;

/// Outcome of picking one variant from a base-scheme group.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub winner: Record,
    /// Every other record in the group, in group order.
    pub losers: Vec<Record>,
    /// Index of the ladder rung that decided, `None` for a singleton group or
    /// when no rung matched and the first record won by default.
    pub rung: Option<usize>,
}

/// Pick the surviving variant of a group via the priority ladder.
///
/// The first rung with any matching record decides; within it the earliest
/// record in group order wins. With no matching rung the first record wins.
/// Returns `None` only for an empty group.
pub fn select_variant(mut group: Vec<Record>, rules: &RuleSet) -> Option<Selection> {
    if group.is_empty() {
        return None;
    }
    if group.len() == 1 {
        let winner = group.remove(0);
        return Some(Selection { winner, losers: Vec::new(), rung: None });
    }

    let upper: Vec<String> = group.iter().map(|r| r.name.to_uppercase()).collect();

    let decided = rules.priority_ladder().iter().enumerate().find_map(|(rung_idx, rung)| {
        upper
            .iter()
            .position(|name| rung.iter().all(|k| name.contains(k.as_str())))
            .map(|pos| (rung_idx, pos))
    });

    let (rung, winner_idx) = match decided {
        Some((rung_idx, pos)) => (Some(rung_idx), pos),
        None => (None, 0),
    };

    let winner = group.remove(winner_idx);
    Some(Selection { winner, losers: group, rung })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(ladder: &[&[&str]]) -> RuleSet {
        let ladder = ladder
            .iter()
            .map(|rung| rung.iter().map(|k| k.to_string()).collect())
            .collect();
        RuleSet::new(vec![], vec![], ladder).unwrap()
    }

    fn rec(name: &str) -> Record {
        Record::new(name, 10.0)
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn empty_group() {
        assert!(select_variant(vec![], &rules(&[&["DIRECT"]])).is_none());
    }

    #[test]
    fn singleton_skips_ladder() {
        let sel = select_variant(vec![rec("ABC Regular")], &rules(&[&["DIRECT"]])).unwrap();
        assert_eq!(sel.winner.name, "ABC Regular");
        assert!(sel.losers.is_empty());
        assert_eq!(sel.rung, None);
    }

    #[test]
    fn direct_beats_regular() {
        let group = vec![
            rec("ABC FUND - REGULAR PLAN - GROWTH"),
            rec("ABC FUND - DIRECT PLAN - GROWTH"),
        ];
        let sel = select_variant(group, &rules(&[&["DIRECT"]])).unwrap();
        assert_eq!(sel.winner.name, "ABC FUND - DIRECT PLAN - GROWTH");
        assert_eq!(names(&sel.losers), vec!["ABC FUND - REGULAR PLAN - GROWTH"]);
        assert_eq!(sel.rung, Some(0));
    }

    #[test]
    fn rung_is_a_conjunction() {
        let group = vec![
            rec("X Direct IDCW"),
            rec("X Regular Growth"),
            rec("X Direct Growth"),
        ];
        let sel = select_variant(group, &rules(&[&["DIRECT", "GROWTH"], &["DIRECT"]])).unwrap();
        assert_eq!(sel.winner.name, "X Direct Growth");
        assert_eq!(sel.rung, Some(0));
        assert_eq!(names(&sel.losers), vec!["X Direct IDCW", "X Regular Growth"]);
    }

    #[test]
    fn falls_through_to_later_rung() {
        let group = vec![rec("X Regular IDCW"), rec("X Regular Growth")];
        let sel = select_variant(group, &rules(&[&["DIRECT"], &["GROWTH"]])).unwrap();
        assert_eq!(sel.winner.name, "X Regular Growth");
        assert_eq!(sel.rung, Some(1));
    }

    #[test]
    fn first_in_group_order_within_rung() {
        let group = vec![rec("X Direct B"), rec("X Direct A")];
        let sel = select_variant(group, &rules(&[&["DIRECT"]])).unwrap();
        assert_eq!(sel.winner.name, "X Direct B");
    }

    #[test]
    fn no_rung_matches_picks_first() {
        let group = vec![rec("X Bonus"), rec("X Weekly"), rec("X Daily")];
        let sel = select_variant(group, &rules(&[&["DIRECT"]])).unwrap();
        assert_eq!(sel.winner.name, "X Bonus");
        assert_eq!(names(&sel.losers), vec!["X Weekly", "X Daily"]);
        assert_eq!(sel.rung, None);
    }

    #[test]
    fn empty_ladder_picks_first() {
        let sel = select_variant(vec![rec("B"), rec("A")], &rules(&[])).unwrap();
        assert_eq!(sel.winner.name, "B");
    }

    #[test]
    fn deterministic() {
        let group = vec![rec("X Regular"), rec("X Direct"), rec("X Direct Growth")];
        let r = rules(&[&["DIRECT"]]);
        let a = select_variant(group.clone(), &r).unwrap();
        let b = select_variant(group, &r).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ladder_match_is_case_insensitive() {
        let group = vec![rec("x regular"), rec("x direct")];
        let sel = select_variant(group, &rules(&[&["Direct"]])).unwrap();
        assert_eq!(sel.winner.name, "x direct");
    }
}
