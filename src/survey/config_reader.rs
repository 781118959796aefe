use crate::survey::*;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "reportName")]
    pub report_name: String,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl FileSource {
    /// A CSV source, the default provider.
    pub fn new(file_path: &str) -> FileSource {
        FileSource {
            provider: "csv".to_string(),
            file_path: file_path.to_string(),
            excel_worksheet_name: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyRules {
    #[serde(rename = "departmentColumn")]
    pub department_column: Option<String>,
    #[serde(rename = "noAnswerLabel")]
    pub no_answer_label: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "responseFileSources")]
    pub response_file_sources: Vec<FileSource>,
    pub rules: Option<SurveyRules>,
}

impl SurveyConfig {
    /// The configuration of a single response file passed on the command line.
    pub fn from_input(input: &str) -> SurveyConfig {
        SurveyConfig {
            output_settings: OutputSettings {
                report_name: io_common::simplify_file_name(input),
                output_directory: None,
            },
            response_file_sources: vec![FileSource::new(input)],
            rules: None,
        }
    }

    pub fn analysis_rules(&self) -> AnalysisRules {
        let mut rules = AnalysisRules::DEFAULT_RULES;
        if let Some(r) = &self.rules {
            if let Some(c) = &r.department_column {
                rules.department_column = c.clone().into();
            }
            if let Some(l) = &r.no_answer_label {
                rules.no_answer_label = l.clone().into();
            }
        }
        rules
    }
}

pub fn read_config(path: &str) -> SurveyResult<SurveyConfig> {
    let config_str = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig = serde_json::from_str(&config_str).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
