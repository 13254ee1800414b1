//! Chunked reader for newline-delimited session records.
//!
//! Sessions are parsed line by line and handed out in chunks of at most
//! `chunk_size` records, so memory use is bounded by one chunk.
//! ```jsonl
//! {"id": "s1", "messages": [{"role": "user", "content": "hello"}]}
//! {"id": "s2", "messages": []}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::error::AppError;
use crate::models::SessionRecord;

/// Iterator over chunks of sessions.
///
/// Stops after the first error: a malformed line aborts the scan.
pub struct SessionChunks<R> {
    lines: Lines<R>,
    chunk_size: usize,
    line_no: usize,
    done: bool,
}

impl SessionChunks<BufReader<File>> {
    /// Open a sessions file for chunked reading
    pub fn open<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self, AppError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), chunk_size))
    }
}

impl<R: BufRead> SessionChunks<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            lines: reader.lines(),
            chunk_size: chunk_size.max(1),
            line_no: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far, blank ones included
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for SessionChunks<R> {
    type Item = Result<Vec<SessionRecord>, AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(self.chunk_size.min(4096));

        while chunk.len() < self.chunk_size {
            let line = match self.lines.next() {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    break;
                }
            };
            self.line_no += 1;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<SessionRecord>(&line) {
                Ok(record) => chunk.push(record),
                Err(source) => {
                    self.done = true;
                    return Some(Err(AppError::MalformedRecord {
                        line: self.line_no,
                        source,
                    }));
                }
            }
        }

        if chunk.is_empty() {
            None
        } else {
            Some(Ok(chunk))
        }
    }
}
