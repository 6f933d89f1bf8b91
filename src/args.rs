use clap::Parser;

/// Ranks all the candidates of an election by running instant-runoff counts one
/// place after the other.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the ballots. The first line lists the candidate names,
    /// separated by tabs, and every other line is a ballot.
    #[clap(value_parser)]
    pub vote_file: Option<String>,

    /// (any value, optional) If present, runs in manual mode: you choose every candidate to eliminate.
    #[clap(value_parser)]
    pub manual: Option<String>,

    /// (file path, optional) A JSON configuration file. The values on the command line take precedence.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If provided,
    /// irvrank will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written in
    /// JSON format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default tsv) The type of the input: tsv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional() {
        let a = Args::try_parse_from(["irvrank", "votes.tsv"]).unwrap();
        assert_eq!(a.vote_file, Some("votes.tsv".to_string()));
        assert_eq!(a.manual, None);
        assert!(!a.verbose);

        let a = Args::try_parse_from(["irvrank", "votes.tsv", "1", "--verbose"]).unwrap();
        assert_eq!(a.manual, Some("1".to_string()));
        assert!(a.verbose);
    }

    #[test]
    fn options() {
        let a = Args::try_parse_from([
            "irvrank",
            "-c",
            "conf.json",
            "--out",
            "stdout",
            "--input-type",
            "xlsx",
            "--excel-worksheet-name",
            "Form1",
        ])
        .unwrap();
        assert_eq!(a.vote_file, None);
        assert_eq!(a.config, Some("conf.json".to_string()));
        assert_eq!(a.out, Some("stdout".to_string()));
        assert_eq!(a.input_type, Some("xlsx".to_string()));
        assert_eq!(a.excel_worksheet_name, Some("Form1".to_string()));
    }
}
