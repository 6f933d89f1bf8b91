use log::debug;
use std::collections::HashSet;

use crate::config::{Preference, ValidationError};

/// Turns raw preference values into dense ranks starting at 1.
///
/// The smallest value becomes rank 1, the next one rank 2, and so on. Gaps
/// collapse and abstentions stay in place:
///
/// ```
/// use irv_ranking::ballot::normalize;
///
/// assert_eq!(normalize(&[Some(5), Some(1), Some(4)]), vec![Some(3), Some(1), Some(2)]);
/// assert_eq!(normalize(&[None, Some(2), Some(1)]), vec![None, Some(2), Some(1)]);
/// ```
pub fn normalize(ballot: &[Preference]) -> Vec<Preference> {
    let mut filled: Vec<(u32, usize)> = ballot
        .iter()
        .enumerate()
        .filter_map(|(pos, p)| p.map(|value| (value, pos)))
        .collect();
    filled.sort();
    let mut res: Vec<Preference> = vec![None; ballot.len()];
    for (rank, (_, pos)) in filled.iter().enumerate() {
        res[*pos] = Some((rank + 1) as u32);
    }
    res
}

/// Checks a raw ballot against the size of the roster.
///
/// `ballot_idx` is only used for reporting.
pub fn check_ballot(
    ballot: &[Preference],
    num_candidates: usize,
    ballot_idx: usize,
) -> Result<(), ValidationError> {
    if ballot.len() != num_candidates {
        return Err(ValidationError::WrongBallotLength {
            ballot: ballot_idx,
            expected: num_candidates,
            found: ballot.len(),
        });
    }
    let mut seen: HashSet<u32> = HashSet::new();
    for (column, p) in ballot.iter().enumerate() {
        match *p {
            Some(0) => {
                return Err(ValidationError::ZeroPreference {
                    ballot: ballot_idx,
                    column,
                });
            }
            Some(value) if !seen.insert(value) => {
                return Err(ValidationError::DuplicatePreference {
                    ballot: ballot_idx,
                    value,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Candidate names must be non-empty and distinct.
pub fn check_candidates(names: &[String]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (column, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(ValidationError::EmptyCandidateName { column });
        }
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateCandidate { name: name.clone() });
        }
    }
    debug!("check_candidates: {} candidates", names.len());
    Ok(())
}

// Ballots are stored by voter. The tally and the elimination work on columns,
// so the two shapes are converted explicitly.

/// Ballots by voter -> preferences by candidate.
pub(crate) fn to_columns(ballots: &[Vec<Preference>], num_candidates: usize) -> Vec<Vec<Preference>> {
    (0..num_candidates)
        .map(|c| ballots.iter().map(|b| b[c]).collect())
        .collect()
}

/// Preferences by candidate -> ballots by voter.
///
/// The number of ballots is explicit: with no column left, the ballots still
/// exist (they are just empty).
pub(crate) fn to_ballots(columns: &[Vec<Preference>], num_ballots: usize) -> Vec<Vec<Preference>> {
    (0..num_ballots)
        .map(|b| columns.iter().map(|col| col[b]).collect())
        .collect()
}
