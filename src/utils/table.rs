//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    pub right: bool,
}

impl Column {
    pub fn left(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right: false,
        }
    }

    pub fn right(header: &str) -> Self {
        Self {
            header: header.to_string(),
            right: true,
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

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths are measured on the visible text (ANSI codes excluded).
    pub fn render(&self, separator: char) -> String {
        let ansi = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").ok();
        let visible = |s: &str| -> usize {
            match &ansi {
                Some(re) => UnicodeWidthStr::width(re.replace_all(s, "").as_ref()),
                None => UnicodeWidthStr::width(s),
            }
        };

        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                self.rows
                    .iter()
                    .filter_map(|r| r.get(i))
                    .map(|c| visible(c.as_str()))
                    .chain(std::iter::once(visible(col.header.as_str())))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let cell = |text: &str, i: usize| -> String {
            let pad = " ".repeat(widths[i].saturating_sub(visible(text)));
            if self.columns[i].right {
                format!("{pad}{text}")
            } else {
                format!("{text}{pad}")
            }
        };

        let mut out = String::new();

        // Header
        let header: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| cell(&c.header, i))
            .collect();
        out.push_str(header.join("  ").trim_end());
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<String> = (0..self.columns.len())
                .map(|i| cell(row.get(i).map(String::as_str).unwrap_or(""), i))
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}
