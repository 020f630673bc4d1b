//! Plain-text summary sections

use std::io::Write;

use anyhow::Result;

use crate::model::Table;

/// Writes the three structural summary sections of a table
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    /// Render all three sections, in order
    pub fn render(&self, table: &Table, preview_rows: usize, writer: &mut dyn Write) -> Result<()> {
        self.write_headers(table, writer)?;
        self.write_preview(table, preview_rows, writer)?;
        self.write_types(table, writer)?;
        Ok(())
    }

    fn write_headers(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer, "--- HEADERS ---")?;
        let names: Vec<String> = table
            .columns
            .iter()
            .map(|c| format!("'{}'", c.name))
            .collect();
        writeln!(writer, "[{}]", names.join(", "))?;
        Ok(())
    }

    fn write_preview(&self, table: &Table, n: usize, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer)?;
        writeln!(writer, "--- FIRST {} ROWS ---", n)?;

        // Leading unlabeled column carries the 0-based row index
        let mut header: Vec<String> = vec![String::new()];
        header.extend(table.columns.iter().map(|c| c.name.clone()));

        let mut table_data: Vec<Vec<String>> = vec![header];
        for (idx, row) in table.preview(n).iter().enumerate() {
            let mut row_data: Vec<String> = vec![idx.to_string()];
            row_data.extend(row.cells.iter().map(|c| c.display().into_owned()));
            table_data.push(row_data);
        }

        write!(writer, "{}", build_table(&table_data))?;
        Ok(())
    }

    fn write_types(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        writeln!(writer)?;
        writeln!(writer, "--- DATA TYPES ---")?;

        let width = table
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0);

        for col in &table.columns {
            writeln!(
                writer,
                "{:<width$}  {}",
                col.name,
                col.inferred_type,
                width = width
            )?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a column-aligned table from string data; first entry is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();

    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.len());
            }
        }
    }

    let mut output = String::new();

    // Top border
    output.push('┌');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┬');
        }
    }
    output.push_str("┐\n");

    // Header row
    if let Some(header) = data.first() {
        output.push('│');
        for (i, cell) in header.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            output.push_str(&format!(" {:width$} │", cell, width = width));
        }
        output.push('\n');
    }

    // Header separator
    output.push('├');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┼');
        }
    }
    output.push_str("┤\n");

    // Data rows
    for row in data.iter().skip(1) {
        output.push('│');
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            output.push_str(&format!(" {:width$} │", cell, width = width));
        }
        output.push('\n');
    }

    // Bottom border
    output.push('└');
    for (i, width) in col_widths.iter().enumerate() {
        output.push_str(&"─".repeat(*width + 2));
        if i < col_widths.len() - 1 {
            output.push('┴');
        }
    }
    output.push_str("┘\n");

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellType, CellValue, Column};

    fn render_to_string(table: &Table, preview_rows: usize) -> String {
        let mut buf = Vec::new();
        TerminalOutput::new()
            .render(table, preview_rows, &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn table_with_rows(row_count: usize) -> Table {
        let mut columns = vec![Column::new("id", 0), Column::new("label", 1)];
        columns[0].inferred_type = CellType::Int;
        columns[1].inferred_type = CellType::String;
        let mut table = Table::new(columns);
        for i in 0..row_count {
            table.add_row(vec![
                CellValue::Int(i as i64),
                CellValue::from(format!("row{}", i)),
            ]);
        }
        table
    }

    #[test]
    fn test_sections_appear_in_order() {
        let out = render_to_string(&table_with_rows(5), 3);
        let headers = out.find("--- HEADERS ---").unwrap();
        let rows = out.find("--- FIRST 3 ROWS ---").unwrap();
        let types = out.find("--- DATA TYPES ---").unwrap();
        assert!(headers < rows && rows < types);
    }

    #[test]
    fn test_headers_render_as_quoted_list() {
        let out = render_to_string(&table_with_rows(1), 3);
        assert!(out.contains("['id', 'label']"));
    }

    #[test]
    fn test_preview_shows_at_most_three_rows() {
        let out = render_to_string(&table_with_rows(5), 3);
        assert!(out.contains("│ 0 │"));
        assert!(out.contains("│ 2 │"));
        assert!(!out.contains("│ 3 │"));
    }

    #[test]
    fn test_short_table_previews_without_padding() {
        let out = render_to_string(&table_with_rows(1), 3);
        assert!(out.contains("│ 0 │"));
        assert!(!out.contains("│ 1 │"));
    }

    #[test]
    fn test_types_section_lists_one_line_per_column() {
        let out = render_to_string(&table_with_rows(2), 3);
        let types = &out[out.find("--- DATA TYPES ---").unwrap()..];
        assert!(types.contains("id     int"));
        assert!(types.contains("label  string"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let table = table_with_rows(4);
        assert_eq!(render_to_string(&table, 3), render_to_string(&table, 3));
    }
}
