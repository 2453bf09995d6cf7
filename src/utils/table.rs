//! Table rendering utilities for CLI outputs.

pub struct Column {
    pub header: String,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, width: usize) -> Self {
        Self {
            header: header.to_string(),
            width,
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

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Plain-text rendering; columns grow to fit their widest cell.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|cell| cell.chars().count())
                    .chain([col.width, col.header.chars().count()])
                    .max()
                    .unwrap_or(col.width)
            })
            .collect();

        let mut out = String::new();

        for (col, w) in self.columns.iter().zip(&widths) {
            out.push_str(&format!("{:<width$} ", col.header, width = *w));
        }
        out.push('\n');
        out.push_str(&"-".repeat(widths.iter().map(|w| w + 1).sum::<usize>()));
        out.push('\n');

        for row in &self.rows {
            for (i, w) in widths.iter().enumerate() {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                out.push_str(&format!("{:<width$} ", cell, width = *w));
            }
            out.push('\n');
        }

        out
    }
}
