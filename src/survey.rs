use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use survey_analysis::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::survey::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The workbook {path} has no worksheet named {name:?}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display(
        "The workbook {path} has several worksheets, the worksheet name must be provided"
    ))]
    AmbiguousWorksheet { path: String },
    #[snafu(display("Line {lineno}: cannot read cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the analysis to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Provider not implemented {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No input: provide a configuration file (--config) or a response file (--input)"))]
    MissingInput {},
    #[snafu(display("Could not find the directory of {path}"))]
    MissingParentDir { path: String },
    #[snafu(display("Analysis failed: {source}"))]
    Analysis { source: AnalysisErrors },
    #[snafu(display("Difference detected between the computed analysis and the reference {path}"))]
    ReferenceMismatch { path: String },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

fn question_tally_to_json(qt: &QuestionTally) -> JSValue {
    let mut responses: JSMap<String, JSValue> = JSMap::new();
    for (option, count) in qt.tally.counts.iter() {
        responses.insert(option.clone(), json!(count));
    }
    json!({
        "question": qt.question,
        "type": qt.question_type.label(),
        "responses": responses,
        "responseCount": qt.tally.response_count,
        "allOptions": qt.all_options,
    })
}

// The key of a department in the output. A department literally named like the
// ungrouped bucket shares its key, and the later one replaces the earlier one.
fn department_key(keys: &JSMap<String, JSValue>, department: &Department) -> String {
    let name = department.name();
    if keys.contains_key(name) {
        warn!(
            "Two departments are named {:?}, only the last one is kept in the output",
            name
        );
    }
    name.to_string()
}

/// Renders the analysis in the JSON shape expected by the report renderer.
pub fn analysis_to_json(res: &AnalysisResult) -> JSValue {
    let o = &res.overview;
    let overview = json!({
        "numberOfDepartments": o.number_of_departments,
        "averageSatisfaction": format!("{}%", o.average_satisfaction),
        "averageDissatisfaction": format!("{}%", o.average_dissatisfaction),
        "departmentWithHighestDissatisfaction": o.highest_dissatisfaction_label(),
        "highestDissatisfactionRate": o.highest_dissatisfaction_rate,
        "totalQuestions": o.total_questions,
        "totalResponses": o.total_responses,
    });

    let mut department_stats: JSMap<String, JSValue> = JSMap::new();
    for ds in res.department_stats.iter() {
        let mut questions: JSMap<String, JSValue> = JSMap::new();
        for (qid, qt) in ds.question_analysis.iter() {
            questions.insert(qid.clone(), question_tally_to_json(qt));
        }
        department_stats.insert(
            department_key(&department_stats, &ds.department),
            json!({
                "questionAnalysis": questions,
                "responseCount": ds.response_count,
            }),
        );
    }

    let mut question_analysis: JSMap<String, JSValue> = JSMap::new();
    for qs in res.question_analysis.iter() {
        let mut department_responses: JSMap<String, JSValue> = JSMap::new();
        for (department, qt) in qs.department_responses.iter() {
            department_responses.insert(
                department_key(&department_responses, department),
                question_tally_to_json(qt),
            );
        }
        question_analysis.insert(
            qs.id.clone(),
            json!({
                "question": qs.question,
                "type": qs.question_type.label(),
                "departmentResponses": department_responses,
                "totalResponses": qs.total_responses,
                "allOptions": qs.all_options,
            }),
        );
    }

    json!({
        "overview": overview,
        "departmentStats": department_stats,
        "questionAnalysis": question_analysis,
    })
}

fn read_responses(root_path: &Path, cfs: &FileSource) -> SurveyResult<Vec<RawResponse>> {
    let p: PathBuf = root_path.join(&cfs.file_path);
    let p2 = p.as_path().display().to_string();
    info!("Attempting to read response file {:?}", p2);
    let responses = match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_responses(&p2),
        "xlsx" => io_xlsx::read_xlsx_responses(&p2, cfs.excel_worksheet_name.as_deref()),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }?;
    info!(
        "Read {:?} responses from {:?}",
        responses.len(),
        io_common::simplify_file_name(&p2)
    );
    Ok(responses)
}

fn write_output(js: &JSValue, out: &str) -> SurveyResult<()> {
    let pretty_js = serde_json::to_string_pretty(js).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
    } else {
        info!("Writing analysis to {:?}", out);
        fs::write(out, pretty_js).context(WritingOutputSnafu { path: out })?;
    }
    Ok(())
}

fn check_reference(result_js: &JSValue, summary_p: &str) -> SurveyResult<()> {
    let summary_ref = read_summary(summary_p)?;
    debug!("check_reference: reference: {:?}", summary_ref);
    if summary_ref != *result_js {
        warn!("Found differences with the reference analysis");
        let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        let pretty_res = serde_json::to_string_pretty(result_js).context(ParsingJsonSnafu {})?;
        print_diff(pretty_ref.as_str(), pretty_res.as_str(), "\n");
        return ReferenceMismatchSnafu { path: summary_p }.fail();
    }
    info!("The analysis matches the reference {:?}", summary_p);
    Ok(())
}

/// Reads all the responses of a survey, analyses them and writes out the analysis.
///
/// Arguments:
/// * `config` the description of the survey
/// * `root_path` the directory against which the file paths of the configuration are resolved
/// * `out` where to write the analysis ('stdout' or a file path). If not provided, it is
/// derived from the output settings.
/// * `check_summary_path` a reference analysis to compare against
pub fn run_survey(
    config: &SurveyConfig,
    root_path: &Path,
    out: Option<String>,
    check_summary_path: Option<String>,
) -> SurveyResult<JSValue> {
    info!("config: {:?}", config);
    let rules = config.analysis_rules();

    let mut data: Vec<RawResponse> = Vec::new();
    for cfs in config.response_file_sources.iter() {
        let mut file_data = read_responses(root_path, cfs)?;
        data.append(&mut file_data);
    }

    let result = run_analysis(&data, &rules).context(AnalysisSnafu {})?;
    debug!("run_survey: result: {:?}", result);

    let result_js = analysis_to_json(&result);

    let out_path: String = match (out, &config.output_settings.output_directory) {
        (Some(o), _) => o,
        (None, Some(dir)) => root_path
            .join(dir)
            .join(format!(
                "{}_analysis.json",
                config.output_settings.report_name
            ))
            .display()
            .to_string(),
        (None, None) => "stdout".to_string(),
    };
    write_output(&result_js, &out_path)?;

    if let Some(summary_p) = check_summary_path {
        check_reference(&result_js, &summary_p)?;
    }

    Ok(result_js)
}

pub fn run_from_args(args: &Args) -> SurveyResult<()> {
    let (mut config, root_path): (SurveyConfig, PathBuf) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu { path: config_path })?;
            (config, root_p.to_path_buf())
        }
        None => {
            let input = args.input.as_ref().context(MissingInputSnafu {})?;
            (SurveyConfig::from_input(input), PathBuf::new())
        }
    };

    // The input on the command line replaces the sources of the configuration file.
    if let (Some(input), Some(_)) = (&args.input, &args.config) {
        let absolute: PathBuf = std::env::current_dir()
            .map(|d| d.join(input))
            .unwrap_or_else(|_| PathBuf::from(input));
        config.response_file_sources = vec![FileSource::new(&absolute.display().to_string())];
    }
    if let Some(input_type) = &args.input_type {
        for cfs in config.response_file_sources.iter_mut() {
            cfs.provider = input_type.clone();
        }
    }
    if let Some(worksheet) = &args.excel_worksheet_name {
        for cfs in config.response_file_sources.iter_mut() {
            cfs.excel_worksheet_name = Some(worksheet.clone());
        }
    }

    run_survey(&config, &root_path, args.out.clone(), args.reference.clone())?;
    Ok(())
}
