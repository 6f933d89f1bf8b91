pub use crate::config::*;
use crate::ballot::{check_ballot, check_candidates};
use crate::table::VoteTable;

/// A builder for adding ballots.
///
/// Each ballot is checked when it is added, so that a faulty ballot is reported
/// with its position.
///
/// ```
/// pub use irv_ranking::builder::Builder;
/// # use irv_ranking::RankingErrors;
///
/// let mut builder = Builder::new()
///     .candidates(&["Anna".to_string(), "Bob".to_string()])?;
///
/// builder.add_ballot(&[Some(1), Some(2)])?;
/// builder.add_ballot_simple(&[2, 0])?;
///
/// let table = builder.build()?;
/// assert_eq!(table.num_ballots(), 2);
///
/// # Ok::<(), RankingErrors>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _candidates: Option<Vec<String>>,
    pub(crate) _ballots: Vec<Vec<Preference>>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Registers the candidates. This resets the ballots already added.
    pub fn candidates(self, cands: &[String]) -> Result<Builder, RankingErrors> {
        if cands.is_empty() {
            return Err(RankingErrors::EmptyElection);
        }
        check_candidates(cands)?;
        Ok(Builder {
            _candidates: Some(cands.to_vec()),
            _ballots: Vec::new(),
        })
    }

    /// Adds a ballot in file notation: `0` is an abstention, any other value
    /// is a preference.
    pub fn add_ballot_simple(&mut self, values: &[u32]) -> Result<(), RankingErrors> {
        let prefs: Vec<Preference> = values
            .iter()
            .map(|v| if *v == 0 { None } else { Some(*v) })
            .collect();
        self.add_ballot(&prefs)
    }

    /// Adds a ballot, aligned with the candidates.
    pub fn add_ballot(&mut self, prefs: &[Preference]) -> Result<(), RankingErrors> {
        let num_candidates = self
            ._candidates
            .as_ref()
            .map(|c| c.len())
            .ok_or(RankingErrors::EmptyElection)?;
        check_ballot(prefs, num_candidates, self._ballots.len())?;
        self._ballots.push(prefs.to_vec());
        Ok(())
    }

    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    pub fn build(self) -> Result<VoteTable, RankingErrors> {
        let names = self._candidates.ok_or(RankingErrors::EmptyElection)?;
        Ok(VoteTable::from_valid(names, self._ballots))
    }
}
