use std::path::Path;

use survey_analysis::RawResponse;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Pairs the cells of a row with the column names of the header.
///
/// Missing cells and cells beyond the width of the header are not part of the response.
pub fn assemble_response<I>(header: &[String], cells: I) -> RawResponse
where
    I: Iterator<Item = Option<String>>,
{
    let fields: Vec<(String, String)> = header
        .iter()
        .zip(cells)
        .filter_map(|(name, cell)| cell.map(|value| (name.clone(), value)))
        .collect();
    RawResponse::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/data/survey.csv"), "survey.csv");
        assert_eq!(simplify_file_name("survey.xlsx"), "survey.xlsx");
    }

    #[test]
    fn assemble() {
        let header: Vec<String> = vec!["Department".to_string(), "Question 1".to_string()];
        let r = assemble_response(
            &header,
            vec![Some("Sales".to_string()), None, Some("extra".to_string())].into_iter(),
        );
        assert_eq!(r.get("Department"), Some("Sales"));
        assert_eq!(r.get("Question 1"), None);
        assert_eq!(r.fields.len(), 1);
    }
}
