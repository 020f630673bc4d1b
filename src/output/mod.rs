//! Summary output for loaded tables

mod terminal;

use anyhow::Result;

use crate::model::Table;

pub use terminal::TerminalOutput;

/// Render the structural summary to stdout
pub fn render_to_stdout(table: &Table, preview_rows: usize) -> Result<()> {
    let mut stdout = std::io::stdout();
    TerminalOutput::new().render(table, preview_rows, &mut stdout)
}
