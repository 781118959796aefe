//! Inference of the type of a question from its answers.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::QuestionType;

static SINGLE_DIGIT_RATING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[1-5]$").unwrap());
static STAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*stars?\s*$").unwrap());

/// The labels that identify a single-select question.
/// The match is exact (case sensitive) on the trimmed answer.
pub const MCQ_VOCABULARY: &[&str] = &[
    // Satisfaction
    "Very Satisfied",
    "Satisfied",
    "Neutral",
    "Dissatisfied",
    "Very Dissatisfied",
    // Agreement
    "Strongly Agree",
    "Agree",
    "Neither Agree nor Disagree",
    "Disagree",
    "Strongly Disagree",
    // Frequency
    "Always",
    "Often",
    "Sometimes",
    "Rarely",
    "Never",
    // Decisions
    "Yes",
    "No",
    "Maybe",
    "Continue",
    "Discontinue",
    "Modify",
    "NA",
    "N/A",
    // Quality
    "Excellent",
    "Very Good",
    "Good",
    "Fair",
    "Poor",
    "Very Poor",
];

pub fn is_mcq_label(answer: &str) -> bool {
    MCQ_VOCABULARY.contains(&answer.trim())
}

/// Exactly one digit between 1 and 5.
pub(crate) fn is_single_digit_rating(answer: &str) -> bool {
    SINGLE_DIGIT_RATING.is_match(answer)
}

/// The digits of a "<number> star(s)" answer, if it has this shape.
/// The number is not restricted to the 1-5 range.
pub(crate) fn star_digits(answer: &str) -> Option<&str> {
    STAR_PATTERN
        .captures(answer)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The first answer that is not blank, in scan order.
pub fn first_answer(all_answers: &[String]) -> Option<&str> {
    all_answers
        .iter()
        .map(|s| s.as_str())
        .find(|s| !s.trim().is_empty())
}

/// Infers the type of a question.
///
/// The first answer takes precedence over the others: the type of a question
/// depends on which answer was scanned first. The remaining answers are only
/// consulted when the first answer does not settle it.
///
/// ```
/// use survey_analysis::{classify, QuestionType};
///
/// assert_eq!(classify(Some("3"), &["3".to_string()]), QuestionType::StarRating);
/// assert_eq!(classify(Some("A, B"), &["A, B".to_string()]), QuestionType::Checkbox);
/// ```
pub fn classify(first_answer: Option<&str>, all_answers: &[String]) -> QuestionType {
    let first = match first_answer {
        Some(s) if !s.trim().is_empty() => s,
        _ => return QuestionType::Text,
    };

    if is_single_digit_rating(first) || star_digits(first).is_some() {
        return QuestionType::StarRating;
    }

    if first.contains(',') {
        return QuestionType::Checkbox;
    }

    if is_mcq_label(first) {
        return QuestionType::Mcq;
    }

    // Majority vote over the rest of the answers.
    let non_empty: Vec<&String> = all_answers
        .iter()
        .filter(|s| !s.trim().is_empty())
        .collect();
    let num_labels = non_empty.iter().filter(|s| is_mcq_label(s)).count();
    debug!(
        "classify: first answer {:?} not conclusive, {} of {} answers are known labels",
        first,
        num_labels,
        non_empty.len()
    );
    if num_labels * 2 > non_empty.len() {
        QuestionType::Mcq
    } else {
        QuestionType::Text
    }
}
