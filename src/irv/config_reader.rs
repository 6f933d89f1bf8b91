use crate::irv::*;

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName")]
    pub contest_name: Option<String>,
    #[serde(rename = "contestDate")]
    pub contest_date: Option<String>,
    #[serde(rename = "contestJurisdiction")]
    pub contest_jurisdiction: Option<String>,
    #[serde(rename = "contestOffice")]
    pub contest_office: Option<String>,
    /// Where the JSON summary is written ('stdout' is accepted).
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

/// The contest description written at the top of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    pub date: Option<String>,
    pub jurisdiction: Option<String>,
    pub office: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    /// tsv (default) or xlsx
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct IrvConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: Option<OutputSettings>,
    #[serde(rename = "voteFileSource")]
    pub vote_file_source: FileSource,
    #[serde(rename = "manualMode")]
    pub manual_mode: Option<bool>,
}

impl IrvConfig {
    /// The configuration when only a vote file is given.
    pub fn for_file(file_path: String) -> IrvConfig {
        IrvConfig {
            output_settings: None,
            vote_file_source: FileSource {
                provider: None,
                file_path,
                excel_worksheet_name: None,
            },
            manual_mode: None,
        }
    }
}

pub fn parse_config(contents: &str) -> IrvResult<IrvConfig> {
    serde_json::from_str(contents).context(ParsingJsonSnafu {})
}

pub fn read_config(path: &str) -> IrvResult<IrvConfig> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    let config = parse_config(&contents)?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> IrvResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu { path })?;
    debug!("read content: {:?}", contents);
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
