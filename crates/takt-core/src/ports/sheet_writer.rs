/// Output port for ticket rendering.
///
/// The renderer addresses one sparse sheet of cells; which backend is bound
/// (CSV file, terminal, anything else) is the caller's business. Backend
/// failures surface to the caller verbatim.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait SheetWriter: Send {
    /// Put a text value into a cell. Rows and columns are 0-based.
    fn write_cell(&mut self, row: u32, col: u32, value: &str) -> anyhow::Result<()>;

    /// Fill a cell background with an `#RRGGBB` colour.
    fn set_cell_fill(&mut self, row: u32, col: u32, rgb: &str) -> anyhow::Result<()>;

    /// Flush the sheet to its destination. Called once, last.
    fn finish(&mut self) -> anyhow::Result<()>;
}
