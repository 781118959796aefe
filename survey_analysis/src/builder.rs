pub use crate::config::*;

/// A builder for assembling survey responses in code.
///
/// Questions are numbered by their position in each response, starting at 1.
///
/// ```
/// pub use survey_analysis::builder::Builder;
/// pub use survey_analysis::{AnalysisRules, QuestionType};
/// # use survey_analysis::AnalysisErrors;
///
/// let mut builder = Builder::new(&AnalysisRules::DEFAULT_RULES);
///
/// builder.add_response(Some("Sales"), &[("How satisfied are you?", "Very Satisfied")]);
/// builder.add_response(Some("Support"), &[("How satisfied are you?", "Dissatisfied")]);
///
/// let result = builder.analyse()?;
/// assert_eq!(result.overview.average_satisfaction, 100);
/// assert_eq!(result.overview.average_dissatisfaction, 75);
/// assert_eq!(result.question_analysis[0].question_type, QuestionType::Mcq);
///
/// # Ok::<(), AnalysisErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: AnalysisRules,
    pub(crate) _responses: Vec<RawResponse>,
}

impl Builder {
    pub fn new(rules: &AnalysisRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _responses: Vec::new(),
        }
    }

    /// Adds a response made of (question text, answer) pairs.
    ///
    /// A department of None puts the response in the ungrouped bucket.
    pub fn add_response(&mut self, department: Option<&str>, answers: &[(&str, &str)]) {
        let mut fields: Vec<(String, String)> = Vec::new();
        if let Some(d) = department {
            fields.push((self._rules.department_column.to_string(), d.to_string()));
        }
        for (idx, (question, answer)) in answers.iter().enumerate() {
            fields.push((format!("Question {}", idx + 1), question.to_string()));
            fields.push((format!("Answer {}", idx + 1), answer.to_string()));
        }
        self.add_raw_response(RawResponse::new(fields));
    }

    /// Adds a response as read from a record source.
    pub fn add_raw_response(&mut self, response: RawResponse) {
        self._responses.push(response);
    }

    pub fn responses(&self) -> &[RawResponse] {
        &self._responses
    }

    pub fn analyse(&self) -> Result<AnalysisResult, AnalysisErrors> {
        crate::run_analysis(&self._responses, &self._rules)
    }
}
