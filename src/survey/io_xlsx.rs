// Primitives for reading Excel exports (Microsoft Forms, Google Forms).

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use log::debug;

use crate::survey::{io_common::assemble_response, *};

/// Reads the responses of a survey from an Excel workbook. The first row holds the
/// column names.
pub fn read_xlsx_responses(path: &str, worksheet: Option<&str>) -> SurveyResult<Vec<RawResponse>> {
    let wrange = get_range(path, worksheet)?;

    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => row
            .iter()
            .map(|cell| read_cell(cell, 1).map(|c| c.map(|s| s.trim().to_string()).unwrap_or_default()))
            .collect::<SurveyResult<Vec<String>>>()?,
        None => {
            debug!("read_xlsx_responses: {:?} has no row", path);
            return Ok(Vec::new());
        }
    };
    debug!("read_xlsx_responses: header: {:?}", header);

    let mut res: Vec<RawResponse> = Vec::new();
    for (idx, row) in iter.enumerate() {
        // The header is row 1.
        let lineno = idx + 2;
        debug!("read_xlsx_responses: lineno: {:?} row: {:?}", lineno, row);
        if let Some(response) = read_row(&header, row, lineno)? {
            res.push(response);
        }
    }
    Ok(res)
}

// A response, or None for a fully empty row (padding at the end of a sheet).
fn read_row(
    header: &[String],
    row: &[DataType],
    lineno: usize,
) -> SurveyResult<Option<RawResponse>> {
    let cells: Vec<Option<String>> = row
        .iter()
        .map(|cell| read_cell(cell, lineno))
        .collect::<SurveyResult<Vec<Option<String>>>>()?;
    if cells.iter().all(|c| c.is_none()) {
        return Ok(None);
    }
    Ok(Some(assemble_response(header, cells.into_iter())))
}

/// The text of a cell, None if the cell is empty.
fn read_cell(cell: &DataType, lineno: usize) -> SurveyResult<Option<String>> {
    match cell {
        DataType::Empty => Ok(None),
        DataType::String(s) => Ok(Some(s.clone())),
        DataType::Int(i) => Ok(Some(i.to_string())),
        // Spreadsheets store all the numbers as floats: 4.0 is read as 4.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            Ok(Some(format!("{}", *f as i64)))
        }
        DataType::Float(f) => Ok(Some(f.to_string())),
        DataType::Bool(b) => Ok(Some(b.to_string())),
        DataType::Error(e) => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", e),
        }
        .fail(),
        other => Ok(Some(other.to_string())),
    }
}

fn get_range(path: &str, worksheet: Option<&str>) -> SurveyResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet {
        let wrange = workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name);
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu { path }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::Empty, 2).unwrap(), None);
        assert_eq!(
            read_cell(&DataType::String("4 stars".to_string()), 2).unwrap(),
            Some("4 stars".to_string())
        );
        assert_eq!(
            read_cell(&DataType::Float(4.0), 2).unwrap(),
            Some("4".to_string())
        );
        assert_eq!(
            read_cell(&DataType::Float(2.5), 2).unwrap(),
            Some("2.5".to_string())
        );
        assert_eq!(
            read_cell(&DataType::Int(3), 2).unwrap(),
            Some("3".to_string())
        );
        assert_eq!(
            read_cell(&DataType::Bool(true), 2).unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    fn error_cells_are_rejected() {
        let res = read_cell(&DataType::Error(calamine::CellErrorType::Div0), 7);
        assert!(matches!(
            res,
            Err(SurveyError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    fn workbook(name: &str) -> String {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join("xlsx")
            .join(name)
            .display()
            .to_string()
    }

    #[test]
    fn empty_rows_are_skipped() {
        let header = vec!["Department".to_string(), "Question 1".to_string()];
        let empty = vec![DataType::Empty, DataType::Empty];
        assert_eq!(read_row(&header, &empty, 8).unwrap(), None);
        let partial = vec![DataType::Empty, DataType::String("x".to_string())];
        let response = read_row(&header, &partial, 9).unwrap().unwrap();
        assert_eq!(response.get("Department"), None);
        assert_eq!(response.get("Question 1"), Some("x"));
    }

    #[test]
    fn single_worksheet() {
        let responses = read_xlsx_responses(&workbook("engagement.xlsx"), None).unwrap();
        assert_eq!(responses.len(), 6);
        assert_eq!(responses[0].get("Department"), Some("Sales"));
        assert_eq!(responses[0].get("Answer 2"), Some("Email, Chat"));
        // Numeric cells
        assert_eq!(responses[0].get("Answer 3"), Some("4"));
        assert_eq!(responses[3].get("Answer 3"), Some("4 stars"));
        assert_eq!(responses[3].get("Answer 4"), None);
        assert_eq!(responses[4].get("Department"), None);
    }

    #[test]
    fn named_worksheet() {
        let responses =
            read_xlsx_responses(&workbook("two_sheets.xlsx"), Some("Form1")).unwrap();
        assert_eq!(responses.len(), 6);
        assert_eq!(responses[5].get("Answer 4"), Some("Better coffee"));

        let same = read_xlsx_responses(&workbook("engagement.xlsx"), Some("Form1")).unwrap();
        assert_eq!(same, responses);
    }

    #[test]
    fn missing_worksheet() {
        let res = read_xlsx_responses(&workbook("two_sheets.xlsx"), Some("Form2"));
        assert!(matches!(
            res,
            Err(SurveyError::MissingWorksheet { name, .. }) if name == "Form2"
        ));
    }

    #[test]
    fn several_worksheets_need_a_name() {
        let res = read_xlsx_responses(&workbook("two_sheets.xlsx"), None);
        assert!(matches!(res, Err(SurveyError::AmbiguousWorksheet { .. })));
    }

    #[test]
    fn missing_workbook() {
        let res = read_xlsx_responses("does_not_exist.xlsx", None);
        assert!(matches!(res, Err(SurveyError::OpeningExcel { .. })));
    }
}
