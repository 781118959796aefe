// Primitives for reading CSV files.

use log::{debug, warn};

use crate::survey::{io_common::assemble_response, *};

/// Reads a CSV export of a survey. The first line holds the column names.
pub fn read_csv_responses(path: &str) -> SurveyResult<Vec<RawResponse>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();

    let header: Vec<String> = match records.next() {
        Some(line_r) => line_r
            .context(CsvLineParseSnafu { lineno: 1_usize })?
            .iter()
            .map(|s| s.trim().to_string())
            .collect(),
        None => {
            warn!("read_csv_responses: {:?} is empty", path);
            return Ok(Vec::new());
        }
    };
    debug!("read_csv_responses: header: {:?}", header);

    let mut res: Vec<RawResponse> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_responses: lineno: {:?} row: {:?}", lineno, line);
        let response = assemble_response(&header, line.iter().map(|s| Some(s.to_string())));
        res.push(response);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn read_engagement() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join("engagement")
            .join("engagement.csv");
        let responses = read_csv_responses(&path.display().to_string()).unwrap();
        assert_eq!(responses.len(), 6);
        assert_eq!(responses[0].get("Department"), Some("Sales"));
        assert_eq!(
            responses[0].get("Question 2"),
            Some("Which channels do you use?")
        );
        assert_eq!(responses[0].get("Answer 2"), Some("Email, Chat"));
    }
}
