use crate::aggregate::FrequencyTable;
use crate::compare;
use crate::dictionary::Dictionary;
use itertools::Itertools;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// One ranked output row: the rendered segment, how often it was selected,
/// and (when a ground-truth pattern is supplied) how well it matches.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub length: usize,
    pub calls: Vec<String>,
    pub percentage: f64,
    pub contains_pattern: Option<bool>,
    pub edit_distance: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    /// Rows dropped because a call id had no dictionary entry.
    pub skipped: usize,
    /// Whether rows carry the ground-truth comparison columns.
    pub compared: bool,
}

/// Join the frequency table with the ground-truth comparison into the final
/// ranked table, one row per unique segment, comparator invoked once each.
/// Rows keep the table's order (percentage descending, key ascending on
/// ties). A dictionary miss skips that row with a warning instead of
/// aborting the run; `pattern = None` is the real-data mode with no
/// comparison columns.
pub fn assemble(
    table: &FrequencyTable,
    dictionary: &Dictionary,
    pattern: Option<&[String]>,
) -> Report {
    let mut rows = Vec::with_capacity(table.rows.len());
    let mut skipped = 0;
    for row in &table.rows {
        let calls = match dictionary.names_of(row.key.tokens()) {
            Ok(names) => names,
            Err(err) => {
                warn!(%err, "skipping segment with unresolved call id");
                skipped += 1;
                continue;
            }
        };
        let (contains_pattern, edit_distance) = match pattern {
            Some(p) => {
                let cmp = compare::compare(&calls, p);
                (Some(cmp.contains_pattern), Some(cmp.edit_distance))
            }
            None => (None, None),
        };
        rows.push(ReportRow {
            length: row.key.len(),
            calls,
            percentage: row.percentage,
            contains_pattern,
            edit_distance,
        });
    }
    Report { rows, skipped, compared: pattern.is_some() }
}

/// Render the report as `;`-delimited CSV lines, header first. Appearance is
/// encoded as 1/0 like the original reports consumed downstream.
pub fn csv_lines(report: &Report) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.rows.len() + 1);
    if report.compared {
        lines.push("length;maliciousCalls;percentage;maliciousBehaviorAppears;difference[calls]".to_string());
    } else {
        lines.push("length;maliciousCalls;percentage".to_string());
    }
    for row in &report.rows {
        let calls = format!("[{}]", row.calls.iter().join(", "));
        let mut line = format!("{};{};{}", row.length, calls, row.percentage);
        if let (Some(appears), Some(distance)) = (row.contains_pattern, row.edit_distance) {
            line.push_str(&format!(";{};{}", u8::from(appears), distance));
        }
        lines.push(line);
    }
    lines
}

/// Persistence seam for emitted rows. Sink failures must never abort
/// computation of further results.
pub trait RowSink {
    fn write_row(&mut self, line: &str) -> io::Result<()>;
}

/// CSV file sink. Owns the handle for the duration of the write and flushes
/// it on drop, so release happens on every exit path.
pub struct CsvFile {
    inner: BufWriter<File>,
}

impl CsvFile {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self { inner: BufWriter::new(File::create(path)?) })
    }
}

impl RowSink for CsvFile {
    fn write_row(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{line}")
    }
}

/// Write every row to the sink, logging failed rows and carrying on with the
/// rest. Returns how many rows were written.
pub fn write_csv(report: &Report, sink: &mut dyn RowSink) -> usize {
    let mut written = 0;
    for line in csv_lines(report) {
        match sink.write_row(&line) {
            Ok(()) => written += 1,
            Err(err) => warn!(%err, "failed to persist report row"),
        }
    }
    written
}
