//! CSV sheet backend.
//!
//! Cells accumulate in a sparse map and flush as a dense CSV grid on
//! `finish`. CSV carries no colour, so a filled cell without a value is
//! marked with `#` to keep the bars visible in a plain spreadsheet import.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use takt_core::SheetWriter;

/// Marker written into fill-only cells.
const FILL_MARKER: &str = "#";

pub struct CsvSheet {
    path: PathBuf,
    cells: BTreeMap<(u32, u32), String>,
    fills: Vec<(u32, u32)>,
}

impl CsvSheet {
    /// The file is created on `finish`, not here, so an aborted render
    /// leaves nothing behind.
    pub fn create(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            cells: BTreeMap::new(),
            fills: Vec::new(),
        }
    }
}

impl SheetWriter for CsvSheet {
    fn write_cell(&mut self, row: u32, col: u32, value: &str) -> anyhow::Result<()> {
        self.cells.insert((row, col), value.to_string());
        Ok(())
    }

    fn set_cell_fill(&mut self, row: u32, col: u32, _rgb: &str) -> anyhow::Result<()> {
        self.fills.push((row, col));
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        for key in self.fills.drain(..) {
            self.cells.entry(key).or_insert_with(|| FILL_MARKER.to_string());
        }

        let (mut max_row, mut max_col) = (0u32, 0u32);
        for (row, col) in self.cells.keys() {
            max_row = max_row.max(*row);
            max_col = max_col.max(*col);
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        for row in 0..=max_row {
            let record: Vec<&str> = (0..=max_col)
                .map(|col| self.cells.get(&(row, col)).map(String::as_str).unwrap_or(""))
                .collect();
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_sheet_writes_dense_grid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ticket.csv");

        let mut sheet = CsvSheet::create(&path);
        sheet.write_cell(0, 0, "title").unwrap();
        sheet.write_cell(2, 1, "EC1").unwrap();
        sheet.set_cell_fill(2, 3, "#4CAF50").unwrap();
        sheet.finish().unwrap();

        let content = std::fs::read_to_string(&path).expect("file written");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "title,,,");
        assert_eq!(lines[1], ",,,");
        assert_eq!(lines[2], ",EC1,,#");
    }

    #[test]
    fn test_csv_sheet_value_wins_over_fill_marker() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ticket.csv");

        let mut sheet = CsvSheet::create(&path);
        sheet.set_cell_fill(0, 0, "#FFE082").unwrap();
        sheet.write_cell(0, 0, "42").unwrap();
        sheet.finish().unwrap();

        let content = std::fs::read_to_string(&path).expect("file written");
        assert_eq!(content.lines().next(), Some("42"));
    }

    #[test]
    fn test_csv_sheet_creates_nothing_until_finished() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ticket.csv");

        let mut sheet = CsvSheet::create(&path);
        sheet.write_cell(0, 0, "x").unwrap();
        assert!(!path.exists());
        sheet.finish().unwrap();
        assert!(path.exists());
    }
}
