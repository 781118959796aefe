//! Discovery of the question columns and collection of the raw answers.

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::config::*;

const QUESTION_PREFIX: &str = "Question";
const ANSWER_PREFIX: &str = "Answer";

/// The pair of columns that carries one question: `Question <n>` for the text of the
/// question, and `Answer <n>` for the answer of the respondent.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct QuestionColumn {
    /// The numeric suffix shared by both columns.
    pub id: String,
    pub text_key: String,
    pub answer_key: String,
}

impl QuestionColumn {
    /// Parses a column name of the form `Question <n>`.
    pub fn parse(column_name: &str) -> Option<QuestionColumn> {
        let suffix = column_name.strip_prefix(QUESTION_PREFIX)?.trim();
        if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        Some(QuestionColumn {
            id: suffix.to_string(),
            text_key: column_name.to_string(),
            answer_key: format!("{} {}", ANSWER_PREFIX, suffix),
        })
    }
}

/// Finds all the question columns, in the order in which they are first seen.
///
/// Two column names with the same numeric suffix describe the same question; the
/// first one wins.
pub fn discover_columns(responses: &[RawResponse]) -> Vec<QuestionColumn> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut columns: Vec<QuestionColumn> = Vec::new();
    for response in responses.iter() {
        for (name, _) in response.fields.iter() {
            if let Some(column) = QuestionColumn::parse(name) {
                if seen_ids.insert(column.id.clone()) {
                    debug!("discover_columns: new question column {:?}", column);
                    columns.push(column);
                }
            }
        }
    }
    columns
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CatalogEntry {
    pub column: QuestionColumn,
    pub text: String,
    /// All the answers, in scan order. Skipped questions are not included,
    /// blank answers are.
    pub raw_answers: Vec<String>,
}

/// The questions of a survey, in the order of discovery.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct QuestionCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl QuestionCatalog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.column.id == id)
    }
}

/// Scans all the responses once and collects the text and the answers of each question.
///
/// A question is only catalogued from the responses in which its text is not blank.
/// The first text seen for a question is kept, later texts are ignored.
pub fn build_catalog(
    responses: &[RawResponse],
    columns: &[QuestionColumn],
    rules: &AnalysisRules,
) -> QuestionCatalog {
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (lineno, response) in responses.iter().enumerate() {
        for column in columns.iter() {
            let text = match response.get(&column.text_key) {
                Some(t) if !t.trim().is_empty() => t,
                _ => continue,
            };
            let pos = match positions.get(&column.id) {
                Some(pos) => {
                    if entries[*pos].text != text {
                        debug!(
                            "build_catalog: response {}: question {} has text {:?}, keeping {:?}",
                            lineno, column.id, text, entries[*pos].text
                        );
                    }
                    *pos
                }
                None => {
                    positions.insert(column.id.clone(), entries.len());
                    entries.push(CatalogEntry {
                        column: column.clone(),
                        text: text.to_string(),
                        raw_answers: Vec::new(),
                    });
                    entries.len() - 1
                }
            };
            match response.get(&column.answer_key) {
                Some(answer) if answer.trim() == rules.no_answer_label => {
                    debug!(
                        "build_catalog: response {}: question {} skipped",
                        lineno, column.id
                    );
                }
                Some(answer) => entries[pos].raw_answers.push(answer.to_string()),
                None => {}
            }
        }
    }
    QuestionCatalog { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(fields: &[(&str, &str)]) -> RawResponse {
        RawResponse::new(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn parse_question_column() {
        let c = QuestionColumn::parse("Question 12").unwrap();
        assert_eq!(c.id, "12");
        assert_eq!(c.text_key, "Question 12");
        assert_eq!(c.answer_key, "Answer 12");

        assert_eq!(QuestionColumn::parse("Answer 1"), None);
        assert_eq!(QuestionColumn::parse("Question"), None);
        assert_eq!(QuestionColumn::parse("Question about pay"), None);
        assert_eq!(QuestionColumn::parse("Department"), None);
    }

    #[test]
    fn columns_in_discovery_order() {
        let responses = vec![
            response(&[("Department", "A"), ("Question 3", "c"), ("Answer 3", "x")]),
            response(&[("Question 1", "a"), ("Question 3", "c"), ("Question 7", "g")]),
        ];
        let ids: Vec<String> = discover_columns(&responses)
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["3", "1", "7"]);
    }

    #[test]
    fn catalog_skips_blank_questions_and_no_answers() {
        let responses = vec![
            response(&[("Question 1", ""), ("Answer 1", "lost"), ("Question 2", "Pay?")]),
            response(&[
                ("Question 1", "Team?"),
                ("Answer 1", "Yes"),
                ("Question 2", "Pay?"),
                ("Answer 2", "No answer"),
            ]),
            response(&[
                ("Question 1", "Another text"),
                ("Answer 1", ""),
                ("Question 2", "Pay?"),
                ("Answer 2", "Fair"),
            ]),
        ];
        let columns = discover_columns(&responses);
        let catalog = build_catalog(&responses, &columns, &AnalysisRules::DEFAULT_RULES);
        assert_eq!(catalog.len(), 2);
        // Question 2 is seen first with a non-blank text.
        assert_eq!(catalog.entries[0].column.id, "2");
        assert_eq!(catalog.entries[0].raw_answers, vec!["Fair".to_string()]);
        let q1 = catalog.get("1").unwrap();
        assert_eq!(q1.text, "Team?");
        assert_eq!(q1.raw_answers, vec!["Yes".to_string(), "".to_string()]);
    }
}
