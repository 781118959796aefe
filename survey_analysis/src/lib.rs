mod config;
use log::{debug, info};

pub mod builder;
pub mod catalog;
pub mod classifier;
pub mod manual;
pub mod options;
pub mod scoring;
pub mod tally;

pub use crate::classifier::classify;
pub use crate::config::*;
pub use crate::options::options;

use crate::catalog::{build_catalog, discover_columns, CatalogEntry};
use crate::classifier::first_answer;
use crate::scoring::score;
use crate::tally::{group_by_department, tally};

/// Runs the analysis of a survey.
///
/// Arguments:
/// * `responses` all the responses of the survey, in input order. The order matters: it
/// decides the order of the departments and questions, the type of the questions and the
/// tiebreak between departments.
/// * `rules` the names of the columns and labels used by the survey tool
///
/// ```
/// use survey_analysis::*;
///
/// let responses = vec![RawResponse::new(vec![
///     ("Department".to_string(), "Sales".to_string()),
///     ("Question 1".to_string(), "Rate the onboarding".to_string()),
///     ("Answer 1".to_string(), "4 stars".to_string()),
/// ])];
/// let result = run_analysis(&responses, &AnalysisRules::DEFAULT_RULES)?;
/// assert_eq!(result.overview.average_satisfaction, 80);
/// assert_eq!(result.overview.highest_dissatisfaction_label(), "None");
///
/// assert_eq!(run_analysis(&[], &AnalysisRules::DEFAULT_RULES), Err(AnalysisErrors::EmptyInput));
/// # Ok::<(), AnalysisErrors>(())
/// ```
pub fn run_analysis(
    responses: &[RawResponse],
    rules: &AnalysisRules,
) -> Result<AnalysisResult, AnalysisErrors> {
    info!("run_analysis: Processing {:?} responses", responses.len());
    if responses.is_empty() {
        return Err(AnalysisErrors::EmptyInput);
    }

    let columns = discover_columns(responses);
    let catalog = build_catalog(responses, &columns, rules);
    let questions: Vec<(QuestionRecord, &CatalogEntry)> = catalog
        .entries
        .iter()
        .map(|entry| (classify_entry(entry, rules), entry))
        .collect();
    info!("run_analysis: {:?} questions catalogued", questions.len());
    for (record, _) in questions.iter() {
        info!(
            "Question {}: {} ({}, {} options)",
            record.id,
            record.text,
            record.question_type,
            record.options.len()
        );
    }

    let groups = group_by_department(responses, rules);
    info!("run_analysis: {:?} departments", groups.len());

    let all_responses: Vec<&RawResponse> = responses.iter().collect();
    let overall_metrics = score(&all_responses, &columns, rules);
    debug!("run_analysis: overall metrics: {:?}", overall_metrics);

    let department_stats: Vec<DepartmentStats> = groups
        .iter()
        .map(|(department, members)| {
            let question_analysis: Vec<(String, QuestionTally)> = questions
                .iter()
                .map(|(record, entry)| {
                    let t = tally(
                        members,
                        &entry.column,
                        record.question_type,
                        &record.options,
                        rules,
                    );
                    (
                        record.id.clone(),
                        QuestionTally {
                            question: record.text.clone(),
                            question_type: record.question_type,
                            tally: t,
                            all_options: record.options.clone(),
                        },
                    )
                })
                .collect();
            let metrics = score(members, &columns, rules);
            info!(
                "Department {}: {} responses, satisfaction {}%, dissatisfaction {}%",
                department,
                members.len(),
                metrics.satisfaction_pct,
                metrics.dissatisfaction_pct
            );
            DepartmentStats {
                department: department.clone(),
                question_analysis,
                response_count: members.len() as u64,
                metrics,
            }
        })
        .collect();

    let question_analysis: Vec<QuestionStats> = questions
        .iter()
        .enumerate()
        .map(|(idx, (record, _))| {
            // All the departments share the catalog order.
            let department_responses: Vec<(Department, QuestionTally)> = department_stats
                .iter()
                .map(|ds| (ds.department.clone(), ds.question_analysis[idx].1.clone()))
                .collect();
            let overall: Tally = department_responses.iter().map(|(_, qt)| &qt.tally).sum();
            QuestionStats {
                id: record.id.clone(),
                question: record.text.clone(),
                question_type: record.question_type,
                department_responses,
                total_responses: overall.response_count,
                all_options: record.options.clone(),
                overall,
            }
        })
        .collect();

    let (worst_department, worst_rate) = find_most_dissatisfied(&department_stats);
    let overview = Overview {
        number_of_departments: department_stats.len(),
        average_satisfaction: overall_metrics.satisfaction_pct,
        average_dissatisfaction: overall_metrics.dissatisfaction_pct,
        department_with_highest_dissatisfaction: worst_department,
        highest_dissatisfaction_rate: worst_rate,
        total_questions: questions.len(),
        total_responses: responses.len(),
    };
    info!("run_analysis: overview: {:?}", overview);

    Ok(AnalysisResult {
        overview,
        department_stats,
        question_analysis,
    })
}

fn classify_entry(entry: &CatalogEntry, rules: &AnalysisRules) -> QuestionRecord {
    let question_type = classify(first_answer(&entry.raw_answers), &entry.raw_answers);
    QuestionRecord {
        id: entry.column.id.clone(),
        text: entry.text.clone(),
        question_type,
        options: options(&entry.raw_answers, question_type, rules),
    }
}

// The department with the strictly highest dissatisfaction. In case of a tie, the
// department seen first in the input wins.
fn find_most_dissatisfied(stats: &[DepartmentStats]) -> (Option<Department>, u32) {
    let mut worst: Option<&DepartmentStats> = None;
    let mut worst_rate: u32 = 0;
    for ds in stats.iter() {
        if ds.metrics.dissatisfaction_pct > worst_rate {
            worst = Some(ds);
            worst_rate = ds.metrics.dissatisfaction_pct;
        }
    }
    (worst.map(|ds| ds.department.clone()), worst_rate)
}
