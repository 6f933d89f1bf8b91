use log::debug;

use crate::config::{Decision, RankingErrors, RoundOutcome};
use crate::table::VoteTable;

/// The external decision maker: a person at a terminal, a script, a test.
///
/// `choose` receives the table ordered from the weakest to the strongest
/// candidate and returns the index of the candidate to eliminate. The index is
/// checked by the caller, and an out-of-range answer leads to a new request.
///
/// The notifications are only sent in manual mode.
pub trait Chooser {
    fn choose(&mut self, table: &VoteTable, decision: Decision) -> Result<usize, RankingErrors>;

    fn announce_elimination(&mut self, _name: &str) -> Result<(), RankingErrors> {
        Ok(())
    }

    fn announce_outcome(&mut self, _outcome: &RoundOutcome) -> Result<(), RankingErrors> {
        Ok(())
    }
}

impl<F> Chooser for F
where
    F: FnMut(&VoteTable, Decision) -> Result<usize, RankingErrors>,
{
    fn choose(&mut self, table: &VoteTable, decision: Decision) -> Result<usize, RankingErrors> {
        self(table, decision)
    }
}

/// Picks the candidate to eliminate when nobody holds a majority.
pub trait EliminationSelector {
    fn select_elimination(&mut self, table: &VoteTable) -> Result<usize, RankingErrors>;

    /// Called after the candidate at `index` of `table` has been eliminated.
    fn on_eliminated(&mut self, _table: &VoteTable, _index: usize) -> Result<(), RankingErrors> {
        Ok(())
    }

    /// Called when a round is resolved.
    fn on_resolved(&mut self, _outcome: &RoundOutcome) -> Result<(), RankingErrors> {
        Ok(())
    }
}

/// Eliminates the weakest candidate, and asks the chooser only when the two
/// strongest candidates are in an unbreakable tie.
pub struct AutomaticSelector<C: Chooser> {
    chooser: C,
}

impl<C: Chooser> AutomaticSelector<C> {
    pub fn new(chooser: C) -> AutomaticSelector<C> {
        AutomaticSelector { chooser }
    }

    pub fn into_chooser(self) -> C {
        self.chooser
    }
}

impl<C: Chooser> EliminationSelector for AutomaticSelector<C> {
    fn select_elimination(&mut self, table: &VoteTable) -> Result<usize, RankingErrors> {
        if table.check_tied() {
            debug!("AutomaticSelector: unbreakable tie, asking the chooser");
            self.chooser.choose(table, Decision::UnbreakableTie)
        } else {
            Ok(0)
        }
    }
}

/// Hands every elimination to the chooser, and keeps it informed.
pub struct ManualSelector<C: Chooser> {
    chooser: C,
}

impl<C: Chooser> ManualSelector<C> {
    pub fn new(chooser: C) -> ManualSelector<C> {
        ManualSelector { chooser }
    }

    pub fn into_chooser(self) -> C {
        self.chooser
    }
}

impl<C: Chooser> EliminationSelector for ManualSelector<C> {
    fn select_elimination(&mut self, table: &VoteTable) -> Result<usize, RankingErrors> {
        self.chooser.choose(table, Decision::Elimination)
    }

    fn on_eliminated(&mut self, table: &VoteTable, index: usize) -> Result<(), RankingErrors> {
        match table.names().get(index) {
            Some(name) => self.chooser.announce_elimination(name),
            None => Ok(()),
        }
    }

    fn on_resolved(&mut self, outcome: &RoundOutcome) -> Result<(), RankingErrors> {
        self.chooser.announce_outcome(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(ns: &[&str], bs: &[&[u32]]) -> VoteTable {
        let names: Vec<String> = ns.iter().map(|s| s.to_string()).collect();
        let ballots: Vec<Vec<Option<u32>>> = bs
            .iter()
            .map(|b| b.iter().map(|x| if *x == 0 { None } else { Some(*x) }).collect())
            .collect();
        VoteTable::new(&names, &ballots).unwrap()
    }

    fn never_called(_: &VoteTable, _: Decision) -> Result<usize, RankingErrors> {
        panic!("the chooser should not be called")
    }

    #[test]
    fn automatic_eliminates_weakest() {
        let t = table(&["A", "B", "C"], &[&[1, 2, 3], &[1, 3, 2], &[2, 1, 3]]);
        let mut s = AutomaticSelector::new(never_called);
        assert_eq!(s.select_elimination(&t), Ok(0));
    }

    #[test]
    fn automatic_asks_on_tie() {
        let t = table(&["A", "B"], &[&[1, 2], &[2, 1]]);
        let mut calls: Vec<Decision> = Vec::new();
        let mut s = AutomaticSelector::new(|_: &VoteTable, d: Decision| -> Result<usize, RankingErrors> {
            calls.push(d);
            Ok(1)
        });
        assert_eq!(s.select_elimination(&t), Ok(1));
        drop(s);
        assert_eq!(calls, vec![Decision::UnbreakableTie]);
    }

    #[test]
    fn manual_always_asks() {
        let t = table(&["A", "B", "C"], &[&[1, 2, 3]]);
        let mut s = ManualSelector::new(|t: &VoteTable, d: Decision| -> Result<usize, RankingErrors> {
            assert_eq!(d, Decision::Elimination);
            Ok(t.num_candidates() - 1)
        });
        assert_eq!(s.select_elimination(&t), Ok(2));
    }

    struct Recorder {
        events: Vec<String>,
    }

    impl Chooser for Recorder {
        fn choose(&mut self, _: &VoteTable, _: Decision) -> Result<usize, RankingErrors> {
            Ok(0)
        }

        fn announce_elimination(&mut self, name: &str) -> Result<(), RankingErrors> {
            self.events.push(format!("eliminated {}", name));
            Ok(())
        }

        fn announce_outcome(&mut self, outcome: &RoundOutcome) -> Result<(), RankingErrors> {
            self.events.push(format!("resolved {}", outcome.name()));
            Ok(())
        }
    }

    #[test]
    fn manual_forwards_notifications() {
        let t = table(&["A", "B"], &[&[1, 2], &[1, 2], &[2, 1]]);
        let mut s = ManualSelector::new(Recorder { events: vec![] });
        s.on_eliminated(&t, 0).unwrap();
        s.on_resolved(&RoundOutcome::Ineligible {
            name: "B".to_string(),
        })
        .unwrap();
        assert_eq!(s.into_chooser().events, vec!["eliminated B", "resolved B"]);
    }
}
