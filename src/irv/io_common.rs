use std::path::Path;

use irv_ranking::builder::Builder;

use crate::irv::*;

/// A ballot, as parsed by the readers.
/// `lineno` is the line (or row) of the file, starting at 1.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedBallot {
    pub lineno: usize,
    pub preferences: Vec<Preference>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedElection {
    pub candidates: Vec<String>,
    pub ballots: Vec<ParsedBallot>,
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// `0` is an abstention, a positive number is a preference.
pub fn parse_token(token: &str, lineno: usize) -> IrvResult<Preference> {
    match token.parse::<u32>() {
        Ok(0) => Ok(None),
        Ok(x) => Ok(Some(x)),
        Err(_) => InvalidTokenSnafu { lineno, token }.fail(),
    }
}

/// Checks every ballot and builds the table.
pub fn build_table(election: &ParsedElection) -> IrvResult<VoteTable> {
    let mut builder = Builder::new()
        .candidates(&election.candidates)
        .context(InvalidCandidatesSnafu {})?;
    for pb in election.ballots.iter() {
        ensure!(
            pb.preferences.len() == election.candidates.len(),
            RowLengthSnafu {
                lineno: pb.lineno,
                expected: election.candidates.len(),
                found: pb.preferences.len()
            }
        );
        builder
            .add_ballot(&pb.preferences)
            .context(InvalidBallotSnafu { lineno: pb.lineno })?;
    }
    builder.build().context(InvalidCandidatesSnafu {})
}
