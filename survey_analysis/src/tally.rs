use log::debug;
use std::collections::HashMap;
use std::ops::AddAssign;

use crate::catalog::QuestionColumn;
use crate::classifier::is_single_digit_rating;
use crate::config::*;
use crate::options::split_checkbox;

/// Splits the responses by department.
///
/// Departments come in the order of their first response, and the responses of a
/// department keep their input order.
pub fn group_by_department<'a>(
    responses: &'a [RawResponse],
    rules: &AnalysisRules,
) -> Vec<(Department, Vec<&'a RawResponse>)> {
    let mut groups: Vec<(Department, Vec<&'a RawResponse>)> = Vec::new();
    let mut positions: HashMap<Department, usize> = HashMap::new();
    for response in responses.iter() {
        let department = match response.get(&rules.department_column) {
            Some(name) if !name.trim().is_empty() => Department::Named(name.to_string()),
            _ => Department::Ungrouped,
        };
        match positions.get(&department) {
            Some(pos) => groups[*pos].1.push(response),
            None => {
                debug!("group_by_department: new department {:?}", department);
                positions.insert(department.clone(), groups.len());
                groups.push((department, vec![response]));
            }
        }
    }
    groups
}

// Counts with a stable order: first the options, then anything else in order of
// first appearance.
struct Counter {
    counts: Vec<(String, u64)>,
    positions: HashMap<String, usize>,
}

impl Counter {
    fn new(options: &[String]) -> Counter {
        let mut c = Counter {
            counts: Vec::new(),
            positions: HashMap::new(),
        };
        for option in options.iter() {
            c.position(option);
        }
        c
    }

    fn position(&mut self, option: &str) -> usize {
        if let Some(pos) = self.positions.get(option) {
            return *pos;
        }
        self.positions.insert(option.to_string(), self.counts.len());
        self.counts.push((option.to_string(), 0));
        self.counts.len() - 1
    }

    fn increment(&mut self, option: &str, count: u64) {
        let pos = self.position(option);
        self.counts[pos].1 += count;
    }
}

/// Counts, for one group of responses, how many times each option of a question
/// was selected.
///
/// Blank answers and skipped questions are ignored. Star ratings only accept a
/// single digit between 1 and 5: any other value is dropped without counting the
/// response. A checkbox answer counts once for each option it selects, but
/// counts the respondent only once, and not at all if it selects nothing.
pub fn tally(
    responses: &[&RawResponse],
    column: &QuestionColumn,
    question_type: QuestionType,
    options: &[String],
    rules: &AnalysisRules,
) -> Tally {
    let mut counter = Counter::new(options);
    let mut response_count: u64 = 0;
    for response in responses.iter() {
        let answer = match response.get(&column.answer_key) {
            Some(a) if !rules.is_excluded_answer(a) => a,
            _ => continue,
        };
        match question_type {
            QuestionType::StarRating => {
                if !is_single_digit_rating(answer) {
                    debug!(
                        "tally: question {}: dropping star value {:?}",
                        column.id, answer
                    );
                    continue;
                }
                counter.increment(answer, 1);
            }
            QuestionType::Checkbox => {
                let mut selected = split_checkbox(answer).peekable();
                if selected.peek().is_none() {
                    debug!(
                        "tally: question {}: no option in {:?}",
                        column.id, answer
                    );
                    continue;
                }
                for option in selected {
                    counter.increment(option, 1);
                }
            }
            QuestionType::Mcq | QuestionType::Text => {
                counter.increment(answer, 1);
            }
        }
        response_count += 1;
    }
    Tally {
        counts: counter.counts,
        response_count,
    }
}

impl AddAssign<&Tally> for Tally {
    fn add_assign(&mut self, rhs: &Tally) {
        let mut counter = Counter {
            counts: std::mem::take(&mut self.counts),
            positions: HashMap::new(),
        };
        for (pos, (option, _)) in counter.counts.iter().enumerate() {
            counter.positions.insert(option.clone(), pos);
        }
        for (option, count) in rhs.counts.iter() {
            counter.increment(option, *count);
        }
        self.counts = counter.counts;
        self.response_count += rhs.response_count;
    }
}

impl<'a> std::iter::Sum<&'a Tally> for Tally {
    fn sum<I: Iterator<Item = &'a Tally>>(iter: I) -> Self {
        let mut total = Tally::default();
        for t in iter {
            total += t;
        }
        total
    }
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

    fn answers(column: &str, xs: &[&str]) -> Vec<RawResponse> {
        xs.iter()
            .map(|a| response(&[("Question 1", "q"), (column, a)]))
            .collect()
    }

    fn strings(xs: &[&str]) -> Vec<String> {
        xs.iter().map(|s| s.to_string()).collect()
    }

    fn column() -> QuestionColumn {
        QuestionColumn::parse("Question 1").unwrap()
    }

    #[test]
    fn checkbox_counts_each_option_once_per_respondent() {
        let responses = answers("Answer 1", &["A, B", "B", "No answer", ""]);
        let refs: Vec<&RawResponse> = responses.iter().collect();
        let t = tally(
            &refs,
            &column(),
            QuestionType::Checkbox,
            &strings(&["A", "B"]),
            &AnalysisRules::DEFAULT_RULES,
        );
        assert_eq!(t.count("A"), 1);
        assert_eq!(t.count("B"), 2);
        assert_eq!(t.response_count, 2);
    }

    #[test]
    fn checkbox_without_selection_is_not_counted() {
        let responses = answers("Answer 1", &["A, B", " , ", ","]);
        let refs: Vec<&RawResponse> = responses.iter().collect();
        let t = tally(
            &refs,
            &column(),
            QuestionType::Checkbox,
            &strings(&["A", "B"]),
            &AnalysisRules::DEFAULT_RULES,
        );
        assert_eq!(
            t.counts,
            vec![("A".to_string(), 1), ("B".to_string(), 1)]
        );
        assert_eq!(t.response_count, 1);
    }

    #[test]
    fn star_rating_drops_other_values() {
        let responses = answers("Answer 1", &["4", "4 stars", "6", " 3", "5", "4"]);
        let refs: Vec<&RawResponse> = responses.iter().collect();
        let options = strings(&["1", "2", "3", "4", "5"]);
        let t = tally(
            &refs,
            &column(),
            QuestionType::StarRating,
            &options,
            &AnalysisRules::DEFAULT_RULES,
        );
        assert_eq!(
            t.counts,
            vec![
                ("1".to_string(), 0),
                ("2".to_string(), 0),
                ("3".to_string(), 0),
                ("4".to_string(), 2),
                ("5".to_string(), 1),
            ]
        );
        assert_eq!(t.response_count, 3);
    }

    #[test]
    fn text_counts_literal_answers() {
        let responses = answers("Answer 1", &["more coffee", "less meetings", "more coffee"]);
        let refs: Vec<&RawResponse> = responses.iter().collect();
        let t = tally(
            &refs,
            &column(),
            QuestionType::Text,
            &[],
            &AnalysisRules::DEFAULT_RULES,
        );
        assert_eq!(
            t.counts,
            vec![
                ("more coffee".to_string(), 2),
                ("less meetings".to_string(), 1)
            ]
        );
        assert_eq!(t.response_count, 3);
    }

    #[test]
    fn missing_answer_column_is_ignored() {
        let responses = vec![response(&[("Question 1", "q")])];
        let refs: Vec<&RawResponse> = responses.iter().collect();
        let t = tally(
            &refs,
            &column(),
            QuestionType::Mcq,
            &strings(&["No", "Yes"]),
            &AnalysisRules::DEFAULT_RULES,
        );
        assert_eq!(t.response_count, 0);
        assert_eq!(t.count("Yes"), 0);
    }

    #[test]
    fn sum_of_tallies() {
        let a = Tally {
            counts: vec![("No".to_string(), 1), ("Yes".to_string(), 2)],
            response_count: 3,
        };
        let b = Tally {
            counts: vec![
                ("No".to_string(), 0),
                ("Yes".to_string(), 1),
                ("other".to_string(), 4),
            ],
            response_count: 5,
        };
        let total: Tally = [a, b].iter().sum();
        assert_eq!(
            total.counts,
            vec![
                ("No".to_string(), 1),
                ("Yes".to_string(), 3),
                ("other".to_string(), 4)
            ]
        );
        assert_eq!(total.response_count, 8);
    }

    #[test]
    fn departments_in_order_of_first_response() {
        let responses = vec![
            response(&[("Department", "Sales")]),
            response(&[("Department", "")]),
            response(&[("Department", "Support")]),
            response(&[]),
            response(&[("Department", "Sales")]),
        ];
        let groups = group_by_department(&responses, &AnalysisRules::DEFAULT_RULES);
        let summary: Vec<(Department, usize)> = groups
            .iter()
            .map(|(d, rs)| (d.clone(), rs.len()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Department::Named("Sales".to_string()), 2),
                (Department::Ungrouped, 2),
                (Department::Named("Support".to_string()), 1),
            ]
        );
    }
}
