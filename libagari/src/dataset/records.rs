//! Fixed-length hand records as written by the enumerator.
//!
//! A file is a plain concatenation of records, one byte per tile
//! (`index + b'A'`), with no header or separator.
use crate::hand::Hand;
use crate::tile::Variant;
use std::io::{self, Read};
use anyhow::{Context, Result};
use rayon::prelude::*;

/// Streams hands out of `R`, one record at a time.
///
/// A truncated last record is dropped with a warning. Malformed records are
/// yielded as errors naming their index.
pub struct RecordReader<R> {
    inner: R,
    variant: Variant,
    buf: Vec<u8>,
    index: u64,
    done: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(variant: Variant, inner: R) -> Self {
        Self {
            inner,
            variant,
            buf: vec![0; variant.hand_len()],
            index: 0,
            done: false,
        }
    }

    /// Records read so far.
    #[inline]
    pub const fn index(&self) -> u64 {
        self.index
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Hand>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match read_record(&mut self.inner, &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) if n < self.buf.len() => {
                log::warn!(
                    "ignoring a partial record of {n} bytes after {} records",
                    self.index,
                );
                self.done = true;
                None
            }
            Ok(_) => {
                let idx = self.index;
                self.index += 1;
                Some(
                    Hand::from_record(self.variant, &self.buf)
                        .with_context(|| format!("malformed record #{idx}")),
                )
            }
            Err(err) => {
                self.done = true;
                Some(Err(err).context("failed to read records"))
            }
        }
    }
}

/// Fills `buf` unless the stream ends first, returning the bytes read.
fn read_record<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => (),
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

/// Decodes an in-memory record file in parallel.
pub fn par_records(
    variant: Variant,
    data: &[u8],
) -> impl IndexedParallelIterator<Item = Result<Hand>> + '_ {
    let len = variant.hand_len();
    let trailing = data.len() % len;
    if trailing != 0 {
        log::warn!(
            "ignoring a partial record of {trailing} bytes after {} records",
            data.len() / len,
        );
    }
    data.par_chunks_exact(len)
        .enumerate()
        .map(move |(idx, record)| {
            Hand::from_record(variant, record).with_context(|| format!("malformed record #{idx}"))
        })
}

/// Number of complete records in `bytes` bytes of input.
#[inline]
pub const fn record_count(variant: Variant, bytes: u64) -> u64 {
    bytes / variant.hand_len() as u64
}
