pub mod xlsx;

use crate::error::DispatchError;
use std::path::Path;

/// Read a job listing from disk as plain text.
///
/// `.xlsx` workbooks are flattened to one line per row; anything else is
/// read as UTF-8 text.
pub fn read_listing(path: &Path) -> Result<String, DispatchError> {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        let bytes = std::fs::read(path)?;
        xlsx::workbook_text(&bytes)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_file_read_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"1pm-3pm (1)\nMESA 85201 - 123 W Main St\n").unwrap();
        let text = read_listing(file.path()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_bad_workbook_is_spreadsheet_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        assert!(matches!(
            read_listing(file.path()),
            Err(DispatchError::Spreadsheet(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            read_listing(Path::new("/nonexistent/listing.txt")),
            Err(DispatchError::Io(_))
        ));
    }
}
