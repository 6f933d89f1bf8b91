use log::debug;
use std::cmp::Ordering;
use std::fmt::Display;

use crate::ballot::{check_ballot, check_candidates, normalize, to_ballots, to_columns};
use crate::config::{Preference, RankingErrors};

/// How many ballots rank a candidate at each position.
///
/// Index 0 holds the first-place votes. Vectors compare lexicographically,
/// so a larger vector is a stronger candidate.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct CountVector(Vec<u64>);

impl CountVector {
    fn zeros(len: usize) -> CountVector {
        CountVector(vec![0; len])
    }

    pub fn first_place(&self) -> u64 {
        self.0.first().cloned().unwrap_or(0)
    }

    /// The number of ballots that rank this candidate at all.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }
}

/// The ballots of an election and the candidates still on the roster.
///
/// The table is an immutable value: eliminations return a new table. After
/// every construction the ballots are normalized and the candidates are
/// sorted from the weakest to the strongest.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteTable {
    names: Vec<String>,
    counts: Vec<CountVector>,
    // By voter, aligned with `names`.
    ballots: Vec<Vec<Preference>>,
}

impl VoteTable {
    /// Builds a table from raw ballots aligned with `names`.
    ///
    /// Ballots are validated first: see [`check_ballot`].
    pub fn new(names: &[String], ballots: &[Vec<Preference>]) -> Result<VoteTable, RankingErrors> {
        check_candidates(names)?;
        for (idx, b) in ballots.iter().enumerate() {
            check_ballot(b, names.len(), idx)?;
        }
        Ok(VoteTable::from_valid(names.to_vec(), ballots.to_vec()))
    }

    // Normalize then tally. Callers guarantee that the ballots are aligned with the names.
    pub(crate) fn from_valid(names: Vec<String>, ballots: Vec<Vec<Preference>>) -> VoteTable {
        let ballots: Vec<Vec<Preference>> = ballots.iter().map(|b| normalize(b)).collect();
        tally(names, ballots)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn counts(&self) -> &[CountVector] {
        &self.counts
    }

    /// The normalized ballots, aligned with [`VoteTable::names`].
    pub fn ballots(&self) -> &[Vec<Preference>] {
        &self.ballots
    }

    pub fn num_candidates(&self) -> usize {
        self.names.len()
    }

    /// All the ballots, including the ones that abstain on every remaining candidate.
    pub fn num_ballots(&self) -> usize {
        self.ballots.len()
    }

    /// The candidates with their count vectors, weakest first.
    pub fn tally(&self) -> Vec<(String, Vec<u64>)> {
        self.names
            .iter()
            .zip(self.counts.iter())
            .map(|(n, c)| (n.clone(), c.as_slice().to_vec()))
            .collect()
    }

    /// The strongest candidate, if its first-place votes are more than half of
    /// all the ballots.
    ///
    /// Abstentions count against the majority.
    pub fn compute_winner(&self) -> Option<&str> {
        let (name, counts) = self.names.last().zip(self.counts.last())?;
        if 2 * counts.first_place() > self.num_ballots() as u64 {
            Some(name.as_str())
        } else {
            None
        }
    }

    /// True if the two strongest candidates cannot be told apart.
    ///
    /// Candidates tied without any vote are not reported: eliminating one or the
    /// other does not change anything.
    pub fn check_tied(&self) -> bool {
        match self.counts.as_slice() {
            [.., second, first] => first == second && first.total() > 0,
            _ => false,
        }
    }

    /// A new table without the candidate at `index`.
    pub fn with_candidate_eliminated(&self, index: usize) -> Result<VoteTable, RankingErrors> {
        if index >= self.num_candidates() {
            return Err(RankingErrors::InvalidSelection {
                index,
                num_candidates: self.num_candidates(),
            });
        }
        let mut columns = to_columns(&self.ballots, self.num_candidates());
        columns.remove(index);
        let mut names = self.names.clone();
        let removed = names.remove(index);
        debug!("with_candidate_eliminated: removing {:?}", removed);
        let ballots = to_ballots(&columns, self.num_ballots());
        Ok(VoteTable::from_valid(names, ballots))
    }

    /// A new table without the candidate called `name`.
    pub fn without_candidate(&self, name: &str) -> Result<VoteTable, RankingErrors> {
        let index = self
            .names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RankingErrors::UnknownCandidate(name.to_string()))?;
        self.with_candidate_eliminated(index)
    }
}

impl Display for VoteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = "# of votes in rank:";
        let width = self
            .names
            .iter()
            .map(|n| n.chars().count())
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);
        let index_width = self.num_candidates().saturating_sub(1).to_string().len();
        let sep = "*".repeat(38);
        let ranks: Vec<String> = (1..=self.num_candidates()).map(|r| r.to_string()).collect();
        writeln!(f, "{}", sep)?;
        writeln!(
            f,
            "{:iw$}  {:w$}: {}",
            "",
            header,
            ranks.join(" "),
            iw = index_width,
            w = width
        )?;
        writeln!(f, "{}", sep)?;
        for (idx, (name, counts)) in self.names.iter().zip(self.counts.iter()).enumerate() {
            let cs: Vec<String> = counts.as_slice().iter().map(|c| c.to_string()).collect();
            writeln!(
                f,
                "{:iw$}: {:w$}: {}",
                idx,
                name,
                cs.join(" "),
                iw = index_width,
                w = width
            )?;
        }
        writeln!(f, "{}", sep)
    }
}

// Counts the votes of every candidate and sorts the roster, weakest first.
// Identical count vectors are ordered by the candidates' normalized votes and
// then by name. This only makes the order total, it carries no electoral meaning.
fn tally(names: Vec<String>, ballots: Vec<Vec<Preference>>) -> VoteTable {
    let num_candidates = names.len();
    let num_ballots = ballots.len();
    let columns = to_columns(&ballots, num_candidates);

    let counts: Vec<CountVector> = columns
        .iter()
        .map(|col| {
            let mut cv = CountVector::zeros(num_candidates);
            for rank in col.iter().flatten() {
                // Normalized ranks are in 1..=num_candidates.
                if let Some(slot) = cv.0.get_mut((*rank - 1) as usize) {
                    *slot += 1;
                }
            }
            cv
        })
        .collect();

    let mut order: Vec<usize> = (0..num_candidates).collect();
    order.sort_by(|&a, &b| {
        compare_candidates(
            (&counts[a], columns[a].as_slice(), names[a].as_str()),
            (&counts[b], columns[b].as_slice(), names[b].as_str()),
        )
    });

    let sorted_columns: Vec<Vec<Preference>> = order.iter().map(|&i| columns[i].clone()).collect();
    let sorted_names: Vec<String> = order.iter().map(|&i| names[i].clone()).collect();
    let sorted_counts: Vec<CountVector> = order.iter().map(|&i| counts[i].clone()).collect();
    debug!(
        "tally: {:?}",
        sorted_names.iter().zip(sorted_counts.iter()).collect::<Vec<_>>()
    );

    VoteTable {
        names: sorted_names,
        counts: sorted_counts,
        ballots: to_ballots(&sorted_columns, num_ballots),
    }
}

fn compare_candidates(
    a: (&CountVector, &[Preference], &str),
    b: (&CountVector, &[Preference], &str),
) -> Ordering {
    a.0.cmp(b.0)
        .then_with(|| a.1.cmp(b.1))
        .then_with(|| a.2.cmp(b.2))
}
