use std::collections::BTreeSet;

use crate::config::{AnalysisRules, QuestionType};

/// The options of a star rating question, whatever the answers.
pub const STAR_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

/// Splits a checkbox answer into its selected options.
/// Blank selections (for example a trailing comma) are dropped.
pub(crate) fn split_checkbox(answer: &str) -> impl Iterator<Item = &str> {
    answer.split(',').map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// The valid options of a question, in a deterministic order.
///
/// Star ratings always have the five options 1 to 5. Single and multi-select
/// questions have all the distinct answers seen, sorted. Free text has no
/// options. Blank answers and the skip label of the rules are not options.
pub fn options(
    all_answers: &[String],
    question_type: QuestionType,
    rules: &AnalysisRules,
) -> Vec<String> {
    let valid = all_answers.iter().filter(|s| !rules.is_excluded_answer(s));
    match question_type {
        QuestionType::StarRating => STAR_OPTIONS.iter().map(|s| s.to_string()).collect(),
        QuestionType::Mcq => {
            let distinct: BTreeSet<&str> = valid.map(|s| s.as_str()).collect();
            distinct.into_iter().map(|s| s.to_string()).collect()
        }
        QuestionType::Checkbox => {
            let distinct: BTreeSet<&str> = valid.flat_map(|s| split_checkbox(s)).collect();
            distinct.into_iter().map(|s| s.to_string()).collect()
        }
        QuestionType::Text => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: AnalysisRules = AnalysisRules::DEFAULT_RULES;

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn star_options_are_fixed() {
        assert_eq!(
            options(&strings(&["4 stars", "9"]), QuestionType::StarRating, &DEFAULTS),
            strings(&["1", "2", "3", "4", "5"])
        );
        assert_eq!(options(&[], QuestionType::StarRating, &DEFAULTS).len(), 5);
    }

    #[test]
    fn mcq_options_sorted_and_distinct() {
        let answers = strings(&["Yes", "No", "", "Yes", "No answer", "Maybe"]);
        assert_eq!(
            options(&answers, QuestionType::Mcq, &DEFAULTS),
            strings(&["Maybe", "No", "Yes"])
        );
    }

    #[test]
    fn checkbox_options_split_and_trimmed() {
        let answers = strings(&["Email, Chat", "Phone,Email", "Chat , ", ""]);
        assert_eq!(
            options(&answers, QuestionType::Checkbox, &DEFAULTS),
            strings(&["Chat", "Email", "Phone"])
        );
    }

    #[test]
    fn options_do_not_depend_on_answer_order() {
        let mut answers = strings(&["b, a", "c", "a", "d, b"]);
        let before = options(&answers, QuestionType::Checkbox, &DEFAULTS);
        answers.reverse();
        assert_eq!(options(&answers, QuestionType::Checkbox, &DEFAULTS), before);
        assert_eq!(options(&answers, QuestionType::Mcq, &DEFAULTS).len(), 4);
    }

    #[test]
    fn custom_skip_label() {
        let rules = AnalysisRules {
            department_column: "Department".into(),
            no_answer_label: "-".into(),
        };
        let answers = strings(&["Yes", "No answer", "-", "No"]);
        assert_eq!(
            options(&answers, QuestionType::Mcq, &rules),
            strings(&["No", "No answer", "Yes"])
        );
    }

    #[test]
    fn text_has_no_options() {
        let answers = strings(&["free", "text"]);
        assert!(options(&answers, QuestionType::Text, &DEFAULTS).is_empty());
    }

    #[test]
    fn code_point_order() {
        let answers = strings(&["b", "B", "a", "Á"]);
        assert_eq!(
            options(&answers, QuestionType::Mcq, &DEFAULTS),
            strings(&["B", "a", "b", "Á"])
        );
    }
}
