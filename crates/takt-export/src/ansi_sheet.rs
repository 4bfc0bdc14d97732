//! ANSI terminal sheet backend.
//!
//! Renders the ticket as a character grid with truecolour bar fills, for a
//! quick look at a schedule without opening a spreadsheet.

use std::collections::BTreeMap;
use std::io::Write;

use colored::Colorize;

use takt_core::SheetWriter;

/// Widths of the four label columns; grid columns are [`GRID_WIDTH`] wide.
const LABEL_WIDTHS: [usize; 4] = [34, 8, 18, 6];
const GRID_WIDTH: usize = 3;

#[derive(Debug, Default, Clone)]
struct Cell {
    text: String,
    fill: Option<(u8, u8, u8)>,
}

pub struct AnsiSheet<W: Write + Send> {
    out: W,
    cells: BTreeMap<(u32, u32), Cell>,
}

impl AnsiSheet<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> AnsiSheet<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            cells: BTreeMap::new(),
        }
    }

    fn cell_mut(&mut self, row: u32, col: u32) -> &mut Cell {
        self.cells.entry((row, col)).or_default()
    }
}

fn parse_hex(rgb: &str) -> Option<(u8, u8, u8)> {
    let hex = rgb.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

fn column_width(col: u32) -> usize {
    LABEL_WIDTHS
        .get(col as usize)
        .copied()
        .unwrap_or(GRID_WIDTH)
}

fn paint(cell: &Cell, width: usize) -> String {
    let mut text = cell.text.clone();
    text.truncate(width);
    let padded = format!("{text:<width$}");
    match cell.fill {
        Some((r, g, b)) => padded.on_truecolor(r, g, b).to_string(),
        None => padded,
    }
}

impl<W: Write + Send> SheetWriter for AnsiSheet<W> {
    fn write_cell(&mut self, row: u32, col: u32, value: &str) -> anyhow::Result<()> {
        self.cell_mut(row, col).text = value.to_string();
        Ok(())
    }

    fn set_cell_fill(&mut self, row: u32, col: u32, rgb: &str) -> anyhow::Result<()> {
        self.cell_mut(row, col).fill = parse_hex(rgb);
        Ok(())
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        let (mut max_row, mut max_col) = (0u32, 0u32);
        for (row, col) in self.cells.keys() {
            max_row = max_row.max(*row);
            max_col = max_col.max(*col);
        }

        for row in 0..=max_row {
            let mut line = String::new();
            for col in 0..=max_col {
                let width = column_width(col);
                match self.cells.get(&(row, col)) {
                    Some(cell) => line.push_str(&paint(cell, width)),
                    None => line.push_str(&" ".repeat(width)),
                }
            }
            writeln!(self.out, "{}", line.trim_end())?;
        }
        self.out.flush()?;
        Ok(())
    }
}
