//! Table rendering utilities for CLI outputs.

use super::formatting::pad_right_visible;
use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            width: UnicodeWidthStr::width(header),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Widens columns to fit the row. Missing cells render empty.
    pub fn add_row(&mut self, row: Vec<String>) {
        for (col, cell) in self.columns.iter_mut().zip(&row) {
            col.width = col.width.max(UnicodeWidthStr::width(cell.as_str()));
        }
        self.rows.push(row);
    }

    pub fn render(&self, separator: &str) -> String {
        let mut out = String::new();

        // Header
        for col in &self.columns {
            out.push_str(&pad_right_visible(&col.header, col.width));
            out.push(' ');
        }
        out.push('\n');

        let line_width: usize = self.columns.iter().map(|c| c.width + 1).sum();
        let sep = if separator.is_empty() { "-" } else { separator };
        out.push_str(&sep.repeat(line_width / UnicodeWidthStr::width(sep).max(1)));
        out.push('\n');

        // Rows
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&pad_right_visible(cell, col.width));
                out.push(' ');
            }
            out.push('\n');
        }

        out
    }
}
