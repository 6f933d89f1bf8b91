pub mod ballot;
pub mod builder;
mod config;
pub mod manual;
pub mod selector;
pub mod table;

use log::{debug, info, warn};

pub use crate::config::*;
pub use crate::selector::{AutomaticSelector, Chooser, EliminationSelector, ManualSelector};
pub use crate::table::{CountVector, VoteTable};

// An out-of-range answer from the chooser is asked again, up to this many times.
const MAX_SELECTION_ATTEMPTS: usize = 100;

type RoundId = u32;

// The state of the driver within one round.
#[derive(Debug)]
enum RoundState {
    Resolving(VoteTable),
    // The outcome and the tally of the table that produced it.
    Resolved(RoundOutcome, Vec<(String, Vec<u64>)>),
}

/// Runs instant-runoff voting over and over to rank every candidate.
///
/// Each round starts from the candidates that have not been ranked or found
/// ineligible yet, and eliminates candidates (with the help of `selector`) until
/// one of them holds a majority. The eliminations of a round are then
/// forgotten: the next round starts from the same roster, minus the candidate
/// that was just resolved.
///
/// ```
/// use irv_ranking::builder::Builder;
/// use irv_ranking::*;
///
/// let mut builder = Builder::new()
///     .candidates(&["A".to_string(), "B".to_string(), "C".to_string()])?;
/// builder.add_ballot_simple(&[1, 2, 3])?;
/// builder.add_ballot_simple(&[1, 3, 2])?;
/// builder.add_ballot_simple(&[2, 1, 3])?;
/// let table = builder.build()?;
///
/// let no_ties = |_: &VoteTable, _: Decision| -> Result<usize, RankingErrors> {
///     Err(RankingErrors::ChooserFailed("unexpected tie".to_string()))
/// };
/// let ranking = run_full_ranking(&table, &mut AutomaticSelector::new(no_ties))?;
/// assert_eq!(ranking.winner(), Some("A"));
/// # Ok::<(), RankingErrors>(())
/// ```
pub fn run_full_ranking<S>(table: &VoteTable, selector: &mut S) -> Result<Ranking, RankingErrors>
where
    S: EliminationSelector + ?Sized,
{
    let num_rounds = table.num_candidates();
    info!(
        "run_full_ranking: {} candidates, {} ballots",
        num_rounds,
        table.num_ballots()
    );
    for (idx, name) in table.names().iter().enumerate() {
        debug!("Candidate: {}: {}", idx, name);
    }

    let mut places: Vec<(u32, String)> = Vec::new();
    let mut ineligible: Vec<String> = Vec::new();
    let mut round_stats: Vec<RoundStats> = Vec::new();

    let mut roster = table.clone();
    for idx in 0..num_rounds {
        let round_id = (idx + 1) as RoundId;
        let next_position = (places.len() + 1) as u32;
        let (stats, round_start) = run_round(roster, round_id, next_position, selector)?;
        selector.on_resolved(&stats.outcome)?;

        match &stats.outcome {
            RoundOutcome::Ranked { name, position } => {
                info!("Round {}: {} takes place {}", round_id, name, position);
                places.push((*position, name.clone()));
            }
            RoundOutcome::Ineligible { name } => {
                info!("Round {}: {} is ineligible", round_id, name);
                ineligible.push(name.clone());
            }
        }

        // Start again from the roster of this round: only the resolved candidate goes away.
        roster = round_start.without_candidate(stats.outcome.name())?;
        round_stats.push(stats);
    }

    Ok(Ranking {
        places,
        ineligible,
        round_stats,
    })
}

// Finds the strongest candidate of `round_start`.
// Returns the statistics of the round and the untouched roster.
fn run_round<S>(
    round_start: VoteTable,
    round_id: RoundId,
    position: u32,
    selector: &mut S,
) -> Result<(RoundStats, VoteTable), RankingErrors>
where
    S: EliminationSelector + ?Sized,
{
    let mut steps: Vec<EliminationStep> = Vec::new();
    let mut state = RoundState::Resolving(round_start.clone());

    while let RoundState::Resolving(working) = state {
        debug!("run_round: round {} table:\n{}", round_id, working);
        state = if let Some(winner) = working.compute_winner() {
            RoundState::Resolved(
                RoundOutcome::Ranked {
                    name: winner.to_string(),
                    position,
                },
                working.tally(),
            )
        } else if working.num_candidates() == 1 {
            // Even with every vote left, this candidate has no majority.
            RoundState::Resolved(
                RoundOutcome::Ineligible {
                    name: working.names()[0].clone(),
                },
                working.tally(),
            )
        } else if working.num_candidates() == 0 {
            return Err(RankingErrors::EmptyElection);
        } else {
            let tied = working.check_tied();
            let (reduced, index) = eliminate_one(&working, selector)?;
            let eliminated = working.names()[index].clone();
            debug!(
                "run_round: round {}: eliminating {} (tied: {})",
                round_id, eliminated, tied
            );
            steps.push(EliminationStep {
                tally: working.tally(),
                eliminated,
                tied,
            });
            RoundState::Resolving(reduced)
        };
    }

    match state {
        RoundState::Resolved(outcome, final_tally) => Ok((
            RoundStats {
                round: round_id,
                steps,
                final_tally,
                outcome,
            },
            round_start,
        )),
        RoundState::Resolving(_) => Err(RankingErrors::NoConvergence),
    }
}

// Asks the selector until it names a candidate of the table.
fn eliminate_one<S>(table: &VoteTable, selector: &mut S) -> Result<(VoteTable, usize), RankingErrors>
where
    S: EliminationSelector + ?Sized,
{
    for _ in 0..MAX_SELECTION_ATTEMPTS {
        let index = selector.select_elimination(table)?;
        match table.with_candidate_eliminated(index) {
            Ok(reduced) => {
                selector.on_eliminated(table, index)?;
                return Ok((reduced, index));
            }
            Err(RankingErrors::InvalidSelection {
                index,
                num_candidates,
            }) => {
                warn!(
                    "eliminate_one: index {} is not a candidate (0..{}), asking again",
                    index, num_candidates
                );
            }
            Err(e) => return Err(e),
        }
    }
    Err(RankingErrors::NoConvergence)
}
