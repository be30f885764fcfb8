//! Tab-separated population report.
//!
//! One line per record: `index<TAB>predators<TAB>victims`, where `index` is
//! the 0-based position of the record in the run.

use crate::world::IterationRecord;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// The first column is the record's position in `records`, not
/// `IterationRecord::iteration`: legacy reports number iterations from 0.
pub fn write_report<W: Write>(mut out: W, records: &[IterationRecord]) -> io::Result<()> {
    for (index, record) in records.iter().enumerate() {
        writeln!(out, "{}\t{}\t{}", index, record.predators, record.victims)?;
    }
    out.flush()
}

pub fn write_report_file(path: &Path, records: &[IterationRecord]) -> io::Result<()> {
    let file = File::create(path)?;
    write_report(BufWriter::new(file), records)
}
