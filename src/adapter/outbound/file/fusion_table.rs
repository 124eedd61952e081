//! CSV reader for the community fusion list.
//!
//! The export opens with `header_skip_rows` title rows before the real header.
//! Columns are located by name, so extra or reordered columns are tolerated.
//! Rows shorter than the header read their missing cells as empty.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::domain::{FusionRow, INPUT_COLUMNS, OUTPUT_COLUMNS};
use crate::error::{Result, SourceError};

/// Read the fusion table at `path`.
///
/// # Errors
/// Fails when the file cannot be opened, is not valid CSV, or lacks the
/// `Input #1` / `Output #1` columns.
pub fn read_fusion_table(path: impl AsRef<Path>, header_skip_rows: usize) -> Result<Vec<FusionRow>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SourceError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let rows = parse_fusion_table(file, header_skip_rows)?;
    info!(path = %path.display(), rows = rows.len(), "Read fusion table");
    Ok(rows)
}

/// Parse fusion table CSV from any reader.
pub fn parse_fusion_table<R: Read>(reader: R, header_skip_rows: usize) -> Result<Vec<FusionRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = reader.records();

    for _ in 0..header_skip_rows {
        if records.next().transpose()?.is_none() {
            return Err(SourceError::MissingHeader {
                skipped: header_skip_rows,
            }
            .into());
        }
    }

    let header = records
        .next()
        .transpose()?
        .ok_or(SourceError::MissingHeader {
            skipped: header_skip_rows,
        })?;
    let layout = ColumnLayout::locate(&header)?;
    debug!(?layout, "Located fusion table columns");

    let mut rows = Vec::new();
    for record in records {
        rows.push(layout.row(&record?));
    }
    Ok(rows)
}

#[derive(Debug)]
struct ColumnLayout {
    inputs: [Option<usize>; 2],
    outputs: [Option<usize>; 3],
}

impl ColumnLayout {
    fn locate(header: &StringRecord) -> Result<Self> {
        let position = |name: &str| header.iter().position(|cell| cell.trim() == name);

        let inputs = INPUT_COLUMNS.map(position);
        let outputs = OUTPUT_COLUMNS.map(position);

        if inputs[0].is_none() {
            return Err(SourceError::MissingColumn {
                column: INPUT_COLUMNS[0],
            }
            .into());
        }
        if outputs[0].is_none() {
            return Err(SourceError::MissingColumn {
                column: OUTPUT_COLUMNS[0],
            }
            .into());
        }
        Ok(Self { inputs, outputs })
    }

    fn row(&self, record: &StringRecord) -> FusionRow {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        FusionRow {
            inputs: self.inputs.map(cell),
            outputs: self.outputs.map(cell),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TABLE: &str = "\
Full Fusion List,,,,
Input #1,Input #2,Output #1,Output #2,Output #3
x2 Zombie,x1 Skeleton,x1 Wither (mythic),,
x5 Tide,,x2 Coral (rare),x1 Shell,
";

    #[test]
    fn reads_rows_after_title_and_header() {
        let rows = parse_fusion_table(TABLE.as_bytes(), 1).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            FusionRow::new(["x2 Zombie", "x1 Skeleton"], ["x1 Wither (mythic)", "", ""])
        );
        assert_eq!(rows[1].outputs[1], "x1 Shell");
    }

    #[test]
    fn columns_are_found_by_name() {
        let table = "Output #1,Notes,Input #1\nx1 Wither,ignored,x2 Zombie\n";
        let rows = parse_fusion_table(table.as_bytes(), 0).unwrap();

        assert_eq!(rows, vec![FusionRow::new(["x2 Zombie", ""], ["x1 Wither", "", ""])]);
    }

    #[test]
    fn short_rows_read_missing_cells_as_empty() {
        let table = "Input #1,Input #2,Output #1,Output #2,Output #3\nx2 Zombie,,x1 Wither\n";
        let rows = parse_fusion_table(table.as_bytes(), 0).unwrap();

        assert_eq!(rows[0].outputs, ["x1 Wither".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let table = "Input #1,Input #2\nx2 Zombie,\n";
        let err = parse_fusion_table(table.as_bytes(), 0).unwrap_err();

        assert!(matches!(
            err,
            Error::Source(SourceError::MissingColumn { column: "Output #1" })
        ));
    }

    #[test]
    fn too_many_skipped_rows_reports_missing_header() {
        let err = parse_fusion_table("only title\n".as_bytes(), 3).unwrap_err();
        assert!(matches!(err, Error::Source(SourceError::MissingHeader { skipped: 3 })));
    }

    #[test]
    fn unreadable_file_is_a_source_error() {
        let err = read_fusion_table("/nonexistent/fusions.csv", 1).unwrap_err();
        assert!(matches!(err, Error::Source(SourceError::ReadFile { .. })));
    }
}
