// ********* Input data structures ***********

use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;

/// One survey submission: a flat list of (column name, cell value) pairs.
///
/// The columns keep the order in which the record source produced them. The recognized
/// columns are the department column and the `Question <n>` / `Answer <n>` pairs.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RawResponse {
    pub fields: Vec<(String, String)>,
}

impl RawResponse {
    pub fn new(fields: Vec<(String, String)>) -> RawResponse {
        RawResponse { fields }
    }

    /// The value of a column, if the column is present in this response.
    /// If a column appears multiple times, the first occurence is returned.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// The kind of a question, inferred from its answers.
///
/// A question receives exactly one type, shared by all the departments.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionType {
    /// Single digit scores between 1 and 5, or "<n> stars" answers.
    StarRating,
    /// Multi-select: one answer may carry several comma-separated options.
    Checkbox,
    /// Single-select answers taken from a known vocabulary of evaluative labels.
    Mcq,
    /// Free text.
    Text,
}

impl QuestionType {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionType::StarRating => "StarRating",
            QuestionType::Checkbox => "Checkbox",
            QuestionType::Mcq => "MCQ",
            QuestionType::Text => "Text",
        }
    }
}

impl Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The group a response is counted in.
///
/// Responses without a department value are not rejected: they all land in the
/// `Ungrouped` bucket.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Department {
    Named(String),
    Ungrouped,
}

impl Department {
    pub const UNGROUPED_LABEL: &'static str = "Ungrouped";

    pub fn name(&self) -> &str {
        match self {
            Department::Named(name) => name.as_str(),
            Department::Ungrouped => Department::UNGROUPED_LABEL,
        }
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ******** Output data structures *********

/// A catalogued question, with its inferred type and its valid options.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionRecord {
    pub id: String,
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<String>,
}

/// The counts of a question for a group of responses.
///
/// The counts follow the order of the options of the question. Answers that are not
/// part of the options (free text) come after, in order of first appearance.
/// For checkbox questions, the sum of the counts may be larger than the number of
/// responses.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    pub counts: Vec<(String, u64)>,
    pub response_count: u64,
}

impl Tally {
    /// The count for an option, 0 if the option never appeared.
    pub fn count(&self, option: &str) -> u64 {
        self.counts
            .iter()
            .find(|(name, _)| name == option)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

/// Satisfaction and dissatisfaction rates, between 0 and 100.
///
/// The two numbers are computed over different answers and do not add up to 100.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct SatisfactionMetrics {
    pub satisfaction_pct: u32,
    pub dissatisfaction_pct: u32,
}

/// The view of one question within one department.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionTally {
    pub question: String,
    pub question_type: QuestionType,
    pub tally: Tally,
    pub all_options: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DepartmentStats {
    pub department: Department,
    /// Indexed by question id, in catalog order.
    pub question_analysis: Vec<(String, QuestionTally)>,
    pub response_count: u64,
    pub metrics: SatisfactionMetrics,
}

/// The cross-department view of one question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionStats {
    pub id: String,
    pub question: String,
    pub question_type: QuestionType,
    /// In department discovery order.
    pub department_responses: Vec<(Department, QuestionTally)>,
    pub total_responses: u64,
    pub all_options: Vec<String>,
    /// The sum of the tallies of all the departments.
    pub overall: Tally,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Overview {
    pub number_of_departments: usize,
    pub average_satisfaction: u32,
    pub average_dissatisfaction: u32,
    /// None if no department has any dissatisfaction.
    pub department_with_highest_dissatisfaction: Option<Department>,
    pub highest_dissatisfaction_rate: u32,
    pub total_questions: usize,
    pub total_responses: usize,
}

impl Overview {
    /// The name of the most dissatisfied department, or the literal "None".
    pub fn highest_dissatisfaction_label(&self) -> &str {
        self.department_with_highest_dissatisfaction
            .as_ref()
            .map(|d| d.name())
            .unwrap_or("None")
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnalysisResult {
    pub overview: Overview,
    /// In department discovery order.
    pub department_stats: Vec<DepartmentStats>,
    /// In question discovery order.
    pub question_analysis: Vec<QuestionStats>,
}

/// Errors that prevent the analysis from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AnalysisErrors {
    /// The record source did not produce any response.
    EmptyInput,
}

impl Error for AnalysisErrors {}

impl Display for AnalysisErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisErrors::EmptyInput => {
                write!(f, "EmptyInputError: no survey response to analyse")
            }
        }
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AnalysisRules {
    /// The column holding the department of the respondent.
    pub department_column: Cow<'static, str>,
    /// The label recorded by the survey tool when a question was skipped.
    pub no_answer_label: Cow<'static, str>,
}

impl AnalysisRules {
    pub const DEFAULT_RULES: AnalysisRules = AnalysisRules {
        department_column: Cow::Borrowed("Department"),
        no_answer_label: Cow::Borrowed("No answer"),
    };

    /// Blank answers and skipped questions are excluded from all counts.
    pub fn is_excluded_answer(&self, answer: &str) -> bool {
        let trimmed = answer.trim();
        trimmed.is_empty() || trimmed == self.no_answer_label
    }
}

impl Default for AnalysisRules {
    fn default() -> Self {
        AnalysisRules::DEFAULT_RULES
    }
}
