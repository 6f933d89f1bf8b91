use log::debug;

use crate::irv::{
    io_common::{parse_token, ParsedBallot, ParsedElection},
    *,
};

pub fn read_tsv_file(path: &str) -> IrvResult<ParsedElection> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    parse_tsv(&contents)
}

/// The first line holds the candidate names, separated by tabs. Every other
/// non-empty line is a ballot, with one whitespace-separated entry per candidate.
pub fn parse_tsv(contents: &str) -> IrvResult<ParsedElection> {
    let mut lines = contents.lines();
    let header = lines
        .next()
        .filter(|l| !l.trim().is_empty())
        .context(EmptyInputSnafu {})?;
    let candidates: Vec<String> = header
        .trim_end_matches('\r')
        .split('\t')
        .map(|s| s.trim().to_string())
        .collect();
    debug!("parse_tsv: candidates: {:?}", candidates);

    let mut ballots: Vec<ParsedBallot> = Vec::new();
    for (idx, line) in lines.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        if line.trim().is_empty() {
            debug!("parse_tsv: skipping empty line {}", lineno);
            continue;
        }
        let preferences = line
            .split_whitespace()
            .map(|tok| parse_token(tok, lineno))
            .collect::<IrvResult<Vec<Preference>>>()?;
        ensure!(
            preferences.len() == candidates.len(),
            RowLengthSnafu {
                lineno,
                expected: candidates.len(),
                found: preferences.len()
            }
        );
        ballots.push(ParsedBallot {
            lineno,
            preferences,
        });
    }
    Ok(ParsedElection {
        candidates,
        ballots,
    })
}
