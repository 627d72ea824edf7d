use std::io::{self, Write};

use serde::Serialize;

use crate::record::Record;

pub struct JsonlWriter<W> {
    writer: W,
}

impl<W: Write> JsonlWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_record<T: Serialize>(&mut self, record: &T) -> io::Result<()> {
        let mut buf = serde_json::to_vec(record)?;
        buf.push(b'\n');
        self.writer.write_all(&buf)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// A line that failed to decode, with its 1-based position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub line: usize,
    pub message: String,
}

/// Decodes every non-blank line as one record. Blank lines are skipped and
/// do not take a record index, but still count toward reported line numbers.
pub fn parse_records(contents: &str) -> Result<Vec<Record>, LineError> {
    let mut records = Vec::new();
    for (idx, line) in contents.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = serde_json::from_str(line).map_err(|err| LineError {
            line: idx + 1,
            message: err.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// One compact JSON object per line with a single trailing newline.
pub fn encode_records(records: &[Record]) -> io::Result<Vec<u8>> {
    if records.is_empty() {
        return Ok(b"\n".to_vec());
    }
    let mut writer = JsonlWriter::new(Vec::new());
    for record in records {
        writer.write_record(record)?;
    }
    Ok(writer.into_inner())
}
