//! Reassembly of newline-delimited records from arbitrary byte chunks.
//!
//! The backend streams one record per line, but the transport delivers
//! bytes in chunks with no alignment to record boundaries. [`LineBuffer`]
//! turns the chunk sequence back into complete records, holding any
//! trailing partial line (including a split multi-byte UTF-8 sequence)
//! until the rest of it arrives.

/// Buffers incoming byte chunks and yields complete, newline-terminated
/// records with the terminator stripped.
///
/// Splitting happens at the byte level: `\n` can never appear inside a
/// multi-byte UTF-8 sequence, so a character cut at a chunk boundary
/// simply stays buffered until its line completes. Each complete record
/// is decoded on its own, with invalid sequences replaced rather than
/// corrupting neighboring records.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4096),
        }
    }

    /// Append a chunk and return every record it completes, in order.
    ///
    /// An empty chunk completes nothing. A chunk consisting solely of a
    /// newline flushes the current buffer as a (possibly empty) record.
    /// A trailing `\r` is stripped along with the `\n`.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buf.extend_from_slice(chunk);

        let mut records = Vec::new();
        let mut start = 0;
        while let Some(offset) = self.buf[start..].iter().position(|&b| b == b'\n') {
            let end = start + offset;
            let mut line = &self.buf[start..end];
            if line.last() == Some(&b'\r') {
                line = &line[..line.len() - 1];
            }
            records.push(String::from_utf8_lossy(line).into_owned());
            start = end + 1;
        }
        self.buf.drain(..start);

        records
    }

    /// Drain any unterminated trailing data.
    ///
    /// Called at stream end. A non-empty remainder is a record that never
    /// received its terminator; the caller decides whether to surface it
    /// (the dispatcher logs and drops it).
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            None
        } else {
            let rest = String::from_utf8_lossy(&self.buf).into_owned();
            self.buf.clear();
            Some(rest)
        }
    }

    /// Check whether the buffer currently holds no partial data.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
