use log::debug;

use crate::catalog::QuestionColumn;
use crate::classifier::star_digits;
use crate::config::*;

/// Scores of the satisfaction labels, on a 0-100 scale.
pub const LIKERT_SCORES: [(&str, u32); 5] = [
    ("Very Satisfied", 100),
    ("Satisfied", 75),
    ("Neutral", 50),
    ("Dissatisfied", 25),
    ("Very Dissatisfied", 0),
];

fn likert_score(label: &str) -> Option<u32> {
    LIKERT_SCORES
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, score)| *score)
}

// A running average.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: f64,
    count: u64,
}

impl Accumulator {
    fn add(&mut self, contribution: f64) {
        self.total += contribution;
        self.count += 1;
    }

    // Star counts above 5 can push the average beyond 100.
    fn percentage(&self) -> u32 {
        if self.count == 0 {
            0
        } else {
            (self.total / self.count as f64).round().clamp(0.0, 100.0) as u32
        }
    }
}

/// Computes the satisfaction and dissatisfaction rates of a group of responses.
///
/// Every answer to a question (with a text) in the group contributes:
/// - "<n> stars" answers count as satisfied from 3 stars up, with a score of `n/5`,
///   and as dissatisfied below, with a score of `(5-n)/5`.
/// - "Very Satisfied" and "Satisfied" count as satisfied, with their Likert score.
/// - "Dissatisfied" and "Very Dissatisfied" count as dissatisfied, with the
///   complement of their Likert score.
///
/// All the other answers are ignored. Each rate is the rounded average of its own
/// contributions: the two rates are independent.
pub fn score(
    responses: &[&RawResponse],
    columns: &[QuestionColumn],
    rules: &AnalysisRules,
) -> SatisfactionMetrics {
    let mut satisfaction = Accumulator::default();
    let mut dissatisfaction = Accumulator::default();

    for response in responses.iter() {
        for column in columns.iter() {
            match response.get(&column.text_key) {
                Some(text) if !text.trim().is_empty() => {}
                _ => continue,
            }
            let answer = match response.get(&column.answer_key) {
                Some(a) if !rules.is_excluded_answer(a) => a,
                _ => continue,
            };

            if let Some(digits) = star_digits(answer) {
                let stars: u64 = match digits.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        debug!("score: dropping star value {:?}", answer);
                        continue;
                    }
                };
                let stars = stars as f64;
                if stars >= 3.0 {
                    satisfaction.add(stars / 5.0 * 100.0);
                } else {
                    dissatisfaction.add((5.0 - stars) / 5.0 * 100.0);
                }
                continue;
            }

            let label = answer.trim();
            match (label, likert_score(label)) {
                ("Very Satisfied" | "Satisfied", Some(s)) => satisfaction.add(s as f64),
                ("Dissatisfied" | "Very Dissatisfied", Some(s)) => {
                    dissatisfaction.add((100 - s) as f64)
                }
                _ => {}
            }
        }
    }

    debug!(
        "score: {} responses, satisfaction {:?}, dissatisfaction {:?}",
        responses.len(),
        satisfaction,
        dissatisfaction
    );
    SatisfactionMetrics {
        satisfaction_pct: satisfaction.percentage(),
        dissatisfaction_pct: dissatisfaction.percentage(),
    }
}
