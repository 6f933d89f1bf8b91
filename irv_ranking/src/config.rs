// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A preference slot on a ballot: a positive preference value, or `None`
/// when the voter abstained on this candidate.
///
/// Once a ballot has been normalized, the value is a dense rank starting at 1.
pub type Preference = Option<u32>;

/// How eliminations are chosen when no candidate holds a majority.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RankingMode {
    /// The weakest candidate is eliminated. The chooser is only consulted
    /// for unbreakable ties.
    Automatic,
    /// Every elimination is handed to the chooser.
    Manual,
}

/// The reason the chooser is asked for a decision.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Decision {
    /// The two strongest candidates have identical, non-empty count vectors.
    UnbreakableTie,
    /// Manual mode: the chooser picks every elimination.
    Elimination,
}

// ******** Output data structures *********

/// How a round of the ranking ended.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RoundOutcome {
    /// The candidate reached a majority and takes the given place (1-based).
    Ranked { name: String, position: u32 },
    /// The last remaining candidate could not reach a majority.
    Ineligible { name: String },
}

impl RoundOutcome {
    pub fn name(&self) -> &str {
        match self {
            RoundOutcome::Ranked { name, .. } => name,
            RoundOutcome::Ineligible { name } => name,
        }
    }
}

/// One elimination performed while resolving a round.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EliminationStep {
    /// The candidates and their count vectors, weakest first, as seen when
    /// the decision was made.
    pub tally: Vec<(String, Vec<u64>)>,
    pub eliminated: String,
    /// Whether the two strongest candidates were in an unbreakable tie.
    pub tied: bool,
}

/// Statistics for one round
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RoundStats {
    pub round: u32,
    pub steps: Vec<EliminationStep>,
    /// The tally of the table that resolved the round.
    pub final_tally: Vec<(String, Vec<u64>)>,
    pub outcome: RoundOutcome,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Ranking {
    /// (position, candidate name), first place first.
    pub places: Vec<(u32, String)>,
    /// Candidates that cannot win even with all remaining votes, in the order
    /// they were found.
    pub ineligible: Vec<String>,
    pub round_stats: Vec<RoundStats>,
}

impl Ranking {
    /// The first place, if anyone was ranked at all.
    pub fn winner(&self) -> Option<&str> {
        self.places.first().map(|(_, name)| name.as_str())
    }
}

/// English ordinal for a place: 1st, 2nd, 3rd, 4th, ..., 11th, 12th, 21st.
pub fn ordinal(position: u32) -> String {
    let suffix = match (position % 10, position % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", position, suffix)
}

impl Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sep = "~".repeat(43);
        writeln!(f, "{}", sep)?;
        for (position, name) in self.places.iter() {
            writeln!(f, "{} place: {}", ordinal(*position), name)?;
        }
        if !self.ineligible.is_empty() {
            writeln!(f, "{}", sep)?;
            writeln!(f, "Ineligible candidates:")?;
            for name in self.ineligible.iter() {
                writeln!(f, "{}", name)?;
            }
        }
        writeln!(f, "{}", sep)
    }
}

// ******** Errors *********

/// Reasons for rejecting an election before tabulation starts.
///
/// Ballot indices are 0-based, in the order the ballots were added.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ValidationError {
    EmptyCandidateName { column: usize },
    DuplicateCandidate { name: String },
    WrongBallotLength {
        ballot: usize,
        expected: usize,
        found: usize,
    },
    ZeroPreference { ballot: usize, column: usize },
    DuplicatePreference { ballot: usize, value: u32 },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyCandidateName { column } => {
                write!(f, "candidate name in column {} is empty", column + 1)
            }
            ValidationError::DuplicateCandidate { name } => {
                write!(f, "candidate {:?} is declared more than once", name)
            }
            ValidationError::WrongBallotLength {
                ballot,
                expected,
                found,
            } => write!(
                f,
                "ballot {} has {} entries but there are {} candidates",
                ballot + 1,
                found,
                expected
            ),
            ValidationError::ZeroPreference { ballot, column } => write!(
                f,
                "ballot {} has a zero preference in column {} (abstentions must be empty)",
                ballot + 1,
                column + 1
            ),
            ValidationError::DuplicatePreference { ballot, value } => write!(
                f,
                "ballot {} uses preference {} more than once",
                ballot + 1,
                value
            ),
        }
    }
}

impl Error for ValidationError {}

/// Errors that prevent the algorithm from completing successfully.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RankingErrors {
    EmptyElection,
    Validation(ValidationError),
    /// The chooser returned an index outside the current roster.
    InvalidSelection { index: usize, num_candidates: usize },
    /// The chooser could not produce a decision (closed input, I/O failure).
    ChooserFailed(String),
    UnknownCandidate(String),
    NoConvergence,
}

impl From<ValidationError> for RankingErrors {
    fn from(e: ValidationError) -> Self {
        RankingErrors::Validation(e)
    }
}

impl Error for RankingErrors {}

impl Display for RankingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RankingErrors::EmptyElection => write!(f, "the election has no candidates"),
            RankingErrors::Validation(e) => write!(f, "invalid election data: {}", e),
            RankingErrors::InvalidSelection {
                index,
                num_candidates,
            } => write!(
                f,
                "candidate index {} is out of range (there are {} candidates)",
                index, num_candidates
            ),
            RankingErrors::ChooserFailed(msg) => write!(f, "no decision was made: {}", msg),
            RankingErrors::UnknownCandidate(name) => write!(f, "unknown candidate {:?}", name),
            RankingErrors::NoConvergence => {
                write!(f, "the tabulation did not converge")
            }
        }
    }
}
