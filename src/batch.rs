//! JSON Lines batch prediction.
//!
//! Input is one `RawInput` object per line. Output is one record per
//! non-blank input line carrying either the grade or the error text, so a
//! bad row never stops the rest of the batch.

use std::io::{self, BufRead, Write};

use rand::Rng;
use serde::Serialize;

use crate::form::random_input;
use crate::predict::Predictor;
use crate::student::RawInput;

/// One parsed input line: its 1-based line number and the record or the
/// parse error.
pub type BatchRow = (usize, Result<RawInput, String>);

/// One output line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchRecord {
    pub line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<RawInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g3: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reads JSONL rows, skipping blank lines.
///
/// Only I/O failures abort the read. A line that is not UTF-8 or not a
/// JSON object becomes an error row.
pub fn read_jsonl<R: BufRead>(reader: R) -> io::Result<Vec<BatchRow>> {
    let mut rows = Vec::new();
    for (idx, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes?;
        let parsed = match String::from_utf8(bytes) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                serde_json::from_str::<RawInput>(&line).map_err(|e| format!("invalid JSON: {}", e))
            }
            Err(e) => Err(format!("invalid UTF-8: {}", e.utf8_error())),
        };
        rows.push((idx + 1, parsed));
    }
    Ok(rows)
}

/// Generates `count` random rows numbered from 1.
pub fn sample_rows<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<BatchRow> {
    (1..=count).map(|line| (line, Ok(random_input(rng)))).collect()
}

/// Predicts every parsed row in parallel.
///
/// With `echo_input` set, each record repeats the input it was computed
/// from; this is how sampled rows are reported.
pub fn run_batch(predictor: &Predictor, rows: Vec<BatchRow>, echo_input: bool) -> Vec<BatchRecord> {
    let mut records: Vec<BatchRecord> = Vec::with_capacity(rows.len());
    let mut inputs = Vec::new();
    let mut pending = Vec::new();

    for (line, parsed) in rows {
        match parsed {
            Ok(raw) => {
                pending.push(records.len());
                inputs.push(raw);
                records.push(BatchRecord {
                    line,
                    input: None,
                    g3: None,
                    error: None,
                });
            }
            Err(e) => records.push(BatchRecord {
                line,
                input: None,
                g3: None,
                error: Some(e),
            }),
        }
    }

    let results = predictor.predict_batch(&inputs);
    for ((slot, raw), result) in pending.into_iter().zip(inputs).zip(results) {
        let record = &mut records[slot];
        match result {
            Ok(grade) => record.g3 = Some(grade.value()),
            Err(e) => record.error = Some(e.to_string()),
        }
        if echo_input {
            record.input = Some(raw);
        }
    }

    let failed = records.iter().filter(|r| r.error.is_some()).count();
    log::info!(
        "Predicted {} rows ({} failed)",
        records.len() - failed,
        failed
    );
    records
}

/// Writes records as JSON Lines.
pub fn write_jsonl<W: Write>(records: &[BatchRecord], writer: &mut W) -> io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *writer, record)?;
        writeln!(writer)?;
    }
    writer.flush()
}
