//! Plain-text table sink

use super::{count_label, DisplaySink, DisplayStatus};
use crate::results::{CompanyRecord, COLUMNS};
use std::io::Write;
use std::sync::Mutex;

/// Writes rows as an aligned text table
pub struct TableSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> TableSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write_table(out: &mut W, rows: &[CompanyRecord]) -> std::io::Result<()> {
        let mut widths = COLUMNS.map(str::len);
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row.cells()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |cells: [&str; 5]| {
            cells
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(out, "{}", line(COLUMNS))?;
        writeln!(
            out,
            "{}",
            widths.map(|w| "-".repeat(w)).join("  ")
        )?;
        for row in rows {
            writeln!(out, "{}", line(row.cells()))?;
        }
        writeln!(out, "{}", count_label(rows.len()))
    }
}

impl<W: Write + Send> DisplaySink for TableSink<W> {
    fn render(&self, rows: &[CompanyRecord]) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = Self::write_table(&mut out, rows) {
            tracing::error!("Failed to write results table: {}", e);
        }
    }

    fn set_status(&self, status: DisplayStatus) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let written = match status {
            DisplayStatus::Loading => writeln!(out, "Searching..."),
            DisplayStatus::Error(message) => writeln!(out, "Search failed: {}", message),
            DisplayStatus::Idle => Ok(()),
        };
        if let Err(e) = written {
            tracing::error!("Failed to write status: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, domain: &str) -> CompanyRecord {
        CompanyRecord {
            name: name.to_string(),
            domain: domain.to_string(),
            ..CompanyRecord::unavailable("1")
        }
    }

    #[test]
    fn test_table_output() {
        let sink = TableSink::new(Vec::new());
        sink.render(&[row("Acme Inc", "acme.com"), row("Acme Corporation", "N/A")]);
        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("Company Name"));
        assert!(lines[1].starts_with("----------------"));
        assert!(lines[2].starts_with("Acme Inc          acme.com"));
        assert!(lines[3].starts_with("Acme Corporation  N/A"));
        assert_eq!(lines[4], "2 companies");
    }

    #[test]
    fn test_status_lines() {
        let sink = TableSink::new(Vec::new());
        sink.set_status(DisplayStatus::Loading);
        sink.set_status(DisplayStatus::Error("HTTP 500: Internal Server Error".to_string()));
        sink.set_status(DisplayStatus::Idle);
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(
            text,
            "Searching...\nSearch failed: HTTP 500: Internal Server Error\n"
        );
    }
}
