//! Sheet backends for ticket export.
//!
//! Binds the core's renderer port to concrete destinations: a CSV file for
//! spreadsheet-bound tickets, or an ANSI-coloured grid on a terminal.

mod ansi_sheet;
mod csv_sheet;

pub use ansi_sheet::AnsiSheet;
pub use csv_sheet::CsvSheet;

use takt_core::SheetWriter;

/// Pick a backend for `dest`: `-` renders to the terminal, a `.csv` path
/// writes a CSV file. Anything else has no backend and is an error.
pub fn open_sheet(dest: &str) -> anyhow::Result<Box<dyn SheetWriter>> {
    if dest == "-" {
        return Ok(Box::new(AnsiSheet::stdout()));
    }
    if dest.to_ascii_lowercase().ends_with(".csv") {
        return Ok(Box::new(CsvSheet::create(dest)));
    }
    anyhow::bail!("no sheet backend for destination: {dest} (use a .csv path or -)")
}
