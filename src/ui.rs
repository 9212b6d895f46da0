//! Box-drawn tables for `incmake order` and `incmake graph`.

use colored::*;
use console::{measure_text_width, truncate_str};

/// Columns never shrink below this many cells when fitting the terminal.
const MIN_COLUMN: usize = 8;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Rows with the wrong number of cells are ignored.
    pub fn add_row(&mut self, row: Vec<String>) {
        if row.len() == self.headers.len() {
            self.rows.push(row);
        }
    }

    pub fn print(&self) {
        let (_, term_width) = console::Term::stdout().size();
        for line in self.render(term_width as usize) {
            println!("{}", line);
        }
    }

    /// Lay the table out within `max_width` terminal cells.
    pub fn render(&self, max_width: usize) -> Vec<String> {
        if self.headers.is_empty() {
            return Vec::new();
        }

        let mut widths: Vec<usize> =
            self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(measure_text_width(&single_line(cell)));
            }
        }

        // indent + outer borders + one separator and two spaces per column
        let overhead = 2 + 1 + 3 * widths.len();
        while overhead + widths.iter().sum::<usize>() > max_width {
            let Some((widest, _)) = widths
                .iter()
                .enumerate()
                .filter(|(_, w)| **w > MIN_COLUMN)
                .max_by_key(|(_, w)| **w)
            else {
                break;
            };
            widths[widest] -= 1;
        }

        let border = |left: &str, mid: &str, right: &str| {
            let cells: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("  {}{}{}", left, cells.join(mid), right)
        };
        let line = |cells: &[String], bold: bool| {
            let mut out = String::from("  │");
            for (cell, &width) in cells.iter().zip(&widths) {
                let text = truncate_str(&single_line(cell), width, "...").to_string();
                let pad = " ".repeat(width.saturating_sub(measure_text_width(&text)));
                let text = if bold { text.bold().to_string() } else { text };
                out.push_str(&format!(" {}{} │", text, pad));
            }
            out
        };

        let mut lines = vec![border("┌", "┬", "┐"), line(self.headers.as_slice(), true)];
        lines.push(border("├", "┼", "┤"));
        lines.extend(self.rows.iter().map(|row| line(row.as_slice(), false)));
        lines.push(border("└", "┴", "┘"));
        lines
    }
}

fn single_line(s: &str) -> String {
    s.replace(['\n', '\r', '\t'], " ")
}
