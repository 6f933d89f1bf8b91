use log::{info, warn};

use irv_ranking::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::irv::config_reader::*;
use crate::irv::io_common::{build_table, simplify_file_name};
use crate::irv::prompt::TerminalChooser;

pub mod config_reader;
mod io_common;
mod io_tsv;
mod io_xlsx;
pub mod prompt;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum IrvError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file has no worksheet"))]
    EmptyExcel {},
    #[snafu(display("Worksheet {name:?} not found"))]
    MissingWorksheet { name: String },
    #[snafu(display("Line {lineno}: cell has an unexpected type: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("The vote file is empty: the first line must list the candidates"))]
    EmptyInput {},
    #[snafu(display("Line {lineno}: {token:?} is not 0 or a positive number"))]
    InvalidToken { lineno: usize, token: String },
    #[snafu(display("Line {lineno}: expected {expected} entries, found {found}"))]
    RowLength {
        lineno: usize,
        expected: usize,
        found: usize,
    },
    #[snafu(display("Line {lineno}: {source}"))]
    InvalidBallot {
        lineno: usize,
        source: RankingErrors,
    },
    #[snafu(display("Invalid candidates: {source}"))]
    InvalidCandidates { source: RankingErrors },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Input type {provider:?} is not supported (expected tsv or xlsx)"))]
    UnknownProvider { provider: String },
    #[snafu(display("No vote file was given"))]
    MissingVoteFile {},
    #[snafu(display("Tabulation failed: {source}"))]
    Tabulation { source: RankingErrors },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type IrvResult<T> = Result<T, IrvError>;

fn tally_to_json(tally: &[(String, Vec<u64>)]) -> Vec<JSValue> {
    tally
        .iter()
        .map(|(name, counts)| json!({"candidate": name, "counts": counts}))
        .collect()
}

fn ranking_to_json(r: &Ranking) -> JSValue {
    let places: Vec<JSValue> = r
        .places
        .iter()
        .map(|(position, name)| json!({"position": position, "candidate": name}))
        .collect();

    let mut rounds: Vec<JSValue> = Vec::new();
    for rs in r.round_stats.iter() {
        let eliminations: Vec<JSValue> = rs
            .steps
            .iter()
            .map(|step| {
                json!({
                    "eliminated": step.eliminated,
                    "unbreakableTie": step.tied,
                    "tally": tally_to_json(&step.tally),
                })
            })
            .collect();
        let outcome = match &rs.outcome {
            RoundOutcome::Ranked { name, position } => {
                json!({"ranked": name, "position": position})
            }
            RoundOutcome::Ineligible { name } => json!({ "ineligible": name }),
        };
        rounds.push(json!({
            "round": rs.round,
            "eliminations": eliminations,
            "tally": tally_to_json(&rs.final_tally),
            "outcome": outcome,
        }));
    }

    json!({
        "ranking": places,
        "ineligible": r.ineligible,
        "rounds": rounds,
    })
}

fn build_summary_js(config: &IrvConfig, ranking: &Ranking) -> JSValue {
    let os = config.output_settings.clone().unwrap_or_default();
    let c = OutputConfig {
        contest: os
            .contest_name
            .unwrap_or_else(|| simplify_file_name(&config.vote_file_source.file_path)),
        date: os.contest_date,
        jurisdiction: os.contest_jurisdiction,
        office: os.contest_office,
    };
    json!({
        "config": c,
        "results": ranking_to_json(ranking) })
}

// Relative paths in a configuration file are relative to the file itself.
fn resolve_path(root: Option<&Path>, p: &str) -> String {
    match root {
        Some(root) if Path::new(p).is_relative() => root.join(p).display().to_string(),
        _ => p.to_string(),
    }
}

fn read_election(source: &FileSource) -> IrvResult<VoteTable> {
    let path = source.file_path.as_str();
    info!("Attempting to read vote file {:?}", path);
    let provider = source.provider.clone().unwrap_or_else(|| "tsv".to_string());
    let parsed = match provider.as_str() {
        "tsv" => io_tsv::read_tsv_file(path)?,
        "xlsx" => io_xlsx::read_excel_file(path, source.excel_worksheet_name.as_deref())?,
        x => {
            return UnknownProviderSnafu { provider: x }.fail();
        }
    };
    info!(
        "read_election: {} candidates, {} ballots",
        parsed.candidates.len(),
        parsed.ballots.len()
    );
    build_table(&parsed)
}

/// Assembles the configuration: the file given with `--config` if any, then
/// the command line on top of it. The paths of the result are resolved.
fn assemble_config(args: &Args) -> IrvResult<IrvConfig> {
    let mut config = match &args.config {
        Some(config_path) => {
            let mut config = read_config(config_path)?;
            let root = Path::new(config_path).parent();
            let source = &mut config.vote_file_source;
            source.file_path = resolve_path(root, &source.file_path);
            if let Some(os) = config.output_settings.as_mut() {
                os.output_file = os.output_file.as_ref().map(|p| resolve_path(root, p));
            }
            config
        }
        None => IrvConfig::for_file(args.vote_file.clone().context(MissingVoteFileSnafu {})?),
    };
    if let Some(vote_file) = &args.vote_file {
        config.vote_file_source.file_path = vote_file.clone();
    }
    if let Some(input_type) = &args.input_type {
        config.vote_file_source.provider = Some(input_type.clone());
    }
    if let Some(sheet) = &args.excel_worksheet_name {
        config.vote_file_source.excel_worksheet_name = Some(sheet.clone());
    }
    if args.manual.is_some() {
        config.manual_mode = Some(true);
    }
    Ok(config)
}

fn ranking_mode(config: &IrvConfig) -> RankingMode {
    match config.manual_mode {
        Some(true) => RankingMode::Manual,
        _ => RankingMode::Automatic,
    }
}

fn write_summary(out: &str, pretty_js: &str) -> IrvResult<()> {
    if out == "stdout" {
        println!("{}", pretty_js);
        Ok(())
    } else {
        info!("Writing summary to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })
    }
}

pub fn run_election(args: &Args) -> IrvResult<()> {
    let config = assemble_config(args)?;
    info!("config: {:?}", config);

    let table = read_election(&config.vote_file_source)?;

    let mode = ranking_mode(&config);
    info!("Ranking mode: {:?}", mode);
    let chooser = TerminalChooser::stdio();
    let ranking = match mode {
        RankingMode::Manual => run_full_ranking(&table, &mut ManualSelector::new(chooser)),
        RankingMode::Automatic => run_full_ranking(&table, &mut AutomaticSelector::new(chooser)),
    }
    .context(TabulationSnafu {})?;

    print!("{}", ranking);

    let result_js = build_summary_js(&config, &ranking);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;

    let out = args.out.clone().or_else(|| {
        config
            .output_settings
            .as_ref()
            .and_then(|os| os.output_file.clone())
    });
    if let Some(out) = out {
        write_summary(&out, &pretty_js_stats)?;
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference string");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            return ReferenceMismatchSnafu {}.fail();
        }
        info!("The summary matches the reference {:?}", summary_p);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use irv_ranking::builder::Builder;

    fn abc_table() -> VoteTable {
        let mut b = Builder::new()
            .candidates(&["A".to_string(), "B".to_string(), "C".to_string()])
            .unwrap();
        for ballot in [[1, 2, 3], [1, 3, 2], [2, 1, 3], [3, 1, 2], [2, 3, 1]] {
            b.add_ballot_simple(&ballot).unwrap();
        }
        b.build().unwrap()
    }

    fn no_tie(_: &VoteTable, _: Decision) -> Result<usize, RankingErrors> {
        Err(RankingErrors::ChooserFailed("tie".to_string()))
    }

    #[test]
    fn summary_json() {
        let ranking =
            run_full_ranking(&abc_table(), &mut AutomaticSelector::new(no_tie)).unwrap();
        let mut config = IrvConfig::for_file("data/board.tsv".to_string());
        config.output_settings = Some(OutputSettings {
            contest_date: Some("2024-05-01".to_string()),
            ..OutputSettings::default()
        });
        let js = build_summary_js(&config, &ranking);

        assert_eq!(js["config"]["contest"], json!("board.tsv"));
        assert_eq!(js["config"]["date"], json!("2024-05-01"));
        let results = &js["results"];
        assert_eq!(
            results["ranking"],
            json!([
                {"position": 1, "candidate": "A"},
                {"position": 2, "candidate": "B"},
                {"position": 3, "candidate": "C"}
            ])
        );
        assert_eq!(results["ineligible"], json!([]));
        let round1 = &results["rounds"][0];
        assert_eq!(round1["round"], json!(1));
        assert_eq!(round1["eliminations"][0]["eliminated"], json!("C"));
        assert_eq!(round1["eliminations"][0]["unbreakableTie"], json!(false));
        assert_eq!(
            round1["eliminations"][0]["tally"][0],
            json!({"candidate": "C", "counts": [1, 2, 2]})
        );
        assert_eq!(round1["outcome"], json!({"ranked": "A", "position": 1}));
        assert_eq!(results["rounds"][1]["eliminations"], json!([]));
    }

    #[test]
    fn paths_relative_to_config() {
        let root = Path::new("conf");
        assert_eq!(
            resolve_path(Some(root), "votes.tsv"),
            Path::new("conf").join("votes.tsv").display().to_string()
        );
        assert_eq!(resolve_path(None, "votes.tsv"), "votes.tsv");
        assert_eq!(resolve_path(Some(root), "/tmp/votes.tsv"), "/tmp/votes.tsv");
    }

    fn args(vote_file: Option<&str>) -> Args {
        Args {
            vote_file: vote_file.map(|s| s.to_string()),
            manual: None,
            config: None,
            reference: None,
            out: None,
            input_type: None,
            excel_worksheet_name: None,
            verbose: false,
        }
    }

    #[test]
    fn command_line_only() {
        let mut a = args(Some("votes.tsv"));
        a.manual = Some("yes".to_string());
        a.input_type = Some("xlsx".to_string());
        let config = assemble_config(&a).unwrap();
        assert_eq!(config.vote_file_source.file_path, "votes.tsv");
        assert_eq!(config.vote_file_source.provider, Some("xlsx".to_string()));
        assert_eq!(config.manual_mode, Some(true));
        assert_eq!(ranking_mode(&config), RankingMode::Manual);
        assert_eq!(config.output_settings, None);
        assert_eq!(
            ranking_mode(&assemble_config(&args(Some("votes.tsv"))).unwrap()),
            RankingMode::Automatic
        );
    }

    #[test]
    fn no_vote_file() {
        assert!(matches!(
            assemble_config(&args(None)),
            Err(IrvError::MissingVoteFile {})
        ));
    }

    #[test]
    fn tsv_end_to_end() {
        let path = std::env::temp_dir().join("irvrank_tsv_end_to_end.tsv");
        fs::write(&path, "A\tB\tC\n1 2 3\n1 3 2\n\n2 1 3\n3 1 2\n2 3 1\n").unwrap();
        let source = FileSource {
            provider: None,
            file_path: path.display().to_string(),
            excel_worksheet_name: None,
        };
        let table = read_election(&source).unwrap();
        assert_eq!(table.num_ballots(), 5);
        let ranking = run_full_ranking(&table, &mut AutomaticSelector::new(no_tie)).unwrap();
        let places: Vec<&str> = ranking.places.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(places, vec!["A", "B", "C"]);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn unknown_provider() {
        let source = FileSource {
            provider: Some("ods".to_string()),
            file_path: "votes.ods".to_string(),
            excel_worksheet_name: None,
        };
        assert!(matches!(
            read_election(&source),
            Err(IrvError::UnknownProvider { .. })
        ));
    }
}
