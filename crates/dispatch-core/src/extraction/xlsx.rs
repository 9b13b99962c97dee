use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use crate::error::DispatchError;

/// Flatten the first sheet of an xlsx workbook into listing text.
///
/// Each row becomes one line of its non-empty cells joined by single spaces.
/// Rows with no content become blank lines so line numbers match the sheet.
pub fn workbook_text(bytes: &[u8]) -> Result<String, DispatchError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| DispatchError::Spreadsheet(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DispatchError::Spreadsheet("workbook has no sheets".into()))?
        .map_err(|e| DispatchError::Spreadsheet(format!("failed to read first sheet: {e}")))?;

    let lines: Vec<String> = sheet.rows().map(row_to_line).collect();
    debug!(rows = lines.len(), "flattened xlsx sheet");
    Ok(lines.join("\n"))
}

/// Join the non-empty cells of a row with single spaces.
pub fn row_to_line(row: &[Data]) -> String {
    row.iter()
        .filter_map(cell_as_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        // Whole-number floats are zips and house numbers; drop the ".0".
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}
