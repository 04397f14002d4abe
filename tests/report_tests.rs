use std::io;
use traceloc::aggregate::aggregate;
use traceloc::dictionary::Dictionary;
use traceloc::report::{assemble, csv_lines, write_csv, RowSink};
use traceloc::trace::ScoredSegment;

fn seg(tokens: &[u32]) -> ScoredSegment {
    ScoredSegment::new(tokens.to_vec(), -1.0)
}

fn dict() -> Dictionary {
    Dictionary::from_entries([
        ("open".to_string(), 1),
        ("read".to_string(), 2),
        ("send".to_string(), 3),
        ("close".to_string(), 4),
    ])
}

fn pattern(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn joins_frequencies_with_the_ground_truth_comparison() {
    let selected = vec![seg(&[1, 2, 3]), seg(&[1, 2, 3]), seg(&[4, 4])];
    let table = aggregate(&selected);
    let pattern = pattern(&["read", "send"]);

    let report = assemble(&table, &dict(), Some(&pattern));
    assert!(report.compared);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.rows.len(), 2);

    let top = &report.rows[0];
    assert_eq!(top.calls, vec!["open", "read", "send"]);
    assert_eq!(top.length, 3);
    assert_eq!(top.contains_pattern, Some(true));
    assert_eq!(top.edit_distance, Some(1));

    let second = &report.rows[1];
    assert_eq!(second.calls, vec!["close", "close"]);
    assert_eq!(second.contains_pattern, Some(false));
    assert_eq!(second.edit_distance, Some(2));
}

#[test]
fn unresolved_ids_skip_the_row_and_keep_the_rest() {
    let selected = vec![seg(&[1, 2]), seg(&[7, 7])];
    let table = aggregate(&selected);

    let report = assemble(&table, &dict(), None);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.rows.len(), 1);
    assert_eq!(report.rows[0].calls, vec!["open", "read"]);
}

#[test]
fn real_data_mode_omits_the_comparison_columns() {
    let table = aggregate(&[seg(&[1, 2])]);
    let report = assemble(&table, &dict(), None);
    assert!(!report.compared);
    let lines = csv_lines(&report);
    assert_eq!(lines[0], "length;maliciousCalls;percentage");
    assert_eq!(lines[1], "2;[open, read];1");
}

#[test]
fn csv_rows_carry_all_five_fields() {
    let selected = vec![seg(&[1, 2, 3]), seg(&[1, 2, 3]), seg(&[1, 2]), seg(&[4, 4])];
    let table = aggregate(&selected);
    let report = assemble(&table, &dict(), Some(&pattern(&["read", "send"])));

    let lines = csv_lines(&report);
    assert_eq!(
        lines[0],
        "length;maliciousCalls;percentage;maliciousBehaviorAppears;difference[calls]"
    );
    assert_eq!(lines[1], "3;[open, read, send];0.5;1;1");
    // count-1 rows tie at 0.25 and fall back to key order
    assert_eq!(lines[2], "2;[open, read];0.25;0;2");
    assert_eq!(lines[3], "2;[close, close];0.25;0;2");
}

struct VecSink(Vec<String>);

impl RowSink for VecSink {
    fn write_row(&mut self, line: &str) -> io::Result<()> {
        self.0.push(line.to_string());
        Ok(())
    }
}

struct FlakySink {
    written: usize,
    fail_on: usize,
}

impl RowSink for FlakySink {
    fn write_row(&mut self, _line: &str) -> io::Result<()> {
        if self.written + 1 == self.fail_on {
            self.written += 1;
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.written += 1;
        Ok(())
    }
}

#[test]
fn persistence_receives_every_line() {
    let table = aggregate(&[seg(&[1, 2]), seg(&[3, 4])]);
    let report = assemble(&table, &dict(), None);
    let mut sink = VecSink(Vec::new());
    let written = write_csv(&report, &mut sink);
    assert_eq!(written, 3);
    assert_eq!(sink.0, csv_lines(&report));
}

#[test]
fn a_failed_row_does_not_abort_the_remaining_rows() {
    let table = aggregate(&[seg(&[1, 2]), seg(&[3, 4])]);
    let report = assemble(&table, &dict(), None);
    let mut sink = FlakySink { written: 0, fail_on: 2 };
    let written = write_csv(&report, &mut sink);
    assert_eq!(written, 2);
    assert_eq!(sink.written, 3);
}
