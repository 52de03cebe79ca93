//! Record output.

use std::io::{self, Write};

use crate::query::Record;

/// One-line rendering of a record: its compact JSON form.
pub fn format_record(record: &Record) -> String {
    serde_json::Value::Object(record.clone()).to_string()
}

/// Write one line per record to `out`, then flush.
pub fn report<W: Write>(records: &[Record], out: &mut W) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", format_record(record))?;
    }
    out.flush()
}
