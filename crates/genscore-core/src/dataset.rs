//! JSON-lines readers and writers for eval datasets, generation dumps and rollouts.
//!
//! One JSON object per line. Blank lines are skipped on read; writes emit compact
//! JSON terminated by `\n`.

use crate::errors::DatasetError;
use crate::model::{EvalSample, GenerationRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

/// Iterator over JSON-lines records.
///
/// Parses lazily, yielding one `Result<T>` per non-blank line.
pub struct JsonLines<R: BufRead, T> {
    reader: R,
    line_buffer: String,
    line_number: usize,
    _record: PhantomData<T>,
}

impl<R: BufRead, T: DeserializeOwned> JsonLines<R, T> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_buffer: String::new(),
            line_number: 0,
            _record: PhantomData,
        }
    }

    /// Current line number (1-indexed, for error messages).
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl<R: BufRead, T: DeserializeOwned> Iterator for JsonLines<R, T> {
    type Item = Result<T, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.line_buffer.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(serde_json::from_str(line).map_err(|source| {
                        DatasetError::Parse {
                            line: self.line_number,
                            source,
                        }
                    }));
                }
                Err(source) => {
                    return Some(Err(DatasetError::Io {
                        path: "<reader>".into(),
                        source,
                    }))
                }
            }
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>, DatasetError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads every record of a JSON-lines file.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DatasetError> {
    JsonLines::new(open(path)?).collect()
}

/// Reads every record paired with the 1-based file line it came from.
pub fn read_jsonl_numbered<T: DeserializeOwned>(
    path: &Path,
) -> Result<Vec<(usize, T)>, DatasetError> {
    let mut lines = JsonLines::new(open(path)?);
    let mut out = Vec::new();
    while let Some(record) = lines.next() {
        out.push((lines.line_number(), record?));
    }
    Ok(out)
}

/// Writes records as JSON lines, replacing the file.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<(), DatasetError> {
    let io_err = |source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut w = BufWriter::new(file);
    write_records(&mut w, records)?;
    w.flush().map_err(io_err)?;
    Ok(())
}

pub fn write_records<W: Write, T: Serialize>(w: &mut W, records: &[T]) -> Result<(), DatasetError> {
    for record in records {
        serde_json::to_writer(&mut *w, record).map_err(DatasetError::Encode)?;
        w.write_all(b"\n").map_err(|source| DatasetError::Io {
            path: "<writer>".into(),
            source,
        })?;
    }
    Ok(())
}

/// Reads an eval dataset of `{"prompt", "reference"}` lines.
pub fn read_eval_dataset(path: &Path) -> Result<Vec<EvalSample>, DatasetError> {
    let samples: Vec<(usize, EvalSample)> = read_jsonl_numbered(path)?;
    check_references(samples.iter().map(|(line, s)| (*line, s.reference.len())))?;
    Ok(samples.into_iter().map(|(_, s)| s).collect())
}

/// Reads a generation dump written by `genscore generate`.
pub fn read_generations(path: &Path) -> Result<Vec<GenerationRecord>, DatasetError> {
    let records: Vec<(usize, GenerationRecord)> = read_jsonl_numbered(path)?;
    check_references(records.iter().map(|(line, r)| (*line, r.reference.len())))?;
    Ok(records.into_iter().map(|(_, r)| r).collect())
}

fn check_references(
    mut lens: impl Iterator<Item = (usize, usize)>,
) -> Result<(), DatasetError> {
    if let Some((line, _)) = lens.find(|&(_, len)| len == 0) {
        return Err(DatasetError::Invalid {
            line,
            message: "record has an empty reference list".into(),
        });
    }
    Ok(())
}
