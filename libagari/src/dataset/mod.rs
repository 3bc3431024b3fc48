//! Record files and tallying them into [`Stats`].
mod records;

pub use records::{RecordReader, par_records, record_count};

use crate::hand::Hand;
use crate::stats::Stats;
use crate::tile::Variant;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use rayon::prelude::*;

fn is_gz(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Opens a record file, decompressing it on the fly if it ends in `.gz`.
pub fn open(path: &Path) -> Result<Box<dyn Read + Send>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    if is_gz(path) {
        Ok(Box::new(GzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

/// Reads a whole record file into memory.
pub fn read_all(path: &Path) -> Result<Vec<u8>> {
    let mut raw = open(path)?;
    let mut data = vec![];
    raw.read_to_end(&mut data)
        .with_context(|| format!("error when reading {}", path.display()))?;
    Ok(data)
}

/// Size of the decoded input when it can be known without reading it.
pub fn input_len(path: &Path) -> Option<u64> {
    if is_gz(path) {
        return None;
    }
    path.metadata().ok().map(|m| m.len())
}

/// Streams `path` into a [`RecordReader`].
pub fn records(variant: Variant, path: &Path) -> Result<RecordReader<Box<dyn Read + Send>>> {
    Ok(RecordReader::new(variant, open(path)?))
}

/// Tallies hands one after another, stopping at the first error.
pub fn tally<I>(variant: Variant, hands: I) -> Result<Stats>
where
    I: IntoIterator<Item = Result<Hand>>,
{
    let mut stats = Stats::new(variant);
    for hand in hands {
        stats.add_hand(&hand?);
    }
    Ok(stats)
}

/// Tallies hands on the current rayon pool and merges the partial results.
///
/// The result equals [`tally`] over the same hands.
pub fn tally_par<I>(variant: Variant, hands: I) -> Result<Stats>
where
    I: IntoParallelIterator<Item = Result<Hand>>,
{
    hands
        .into_par_iter()
        .try_fold(
            || Stats::new(variant),
            |mut stats, hand| {
                stats.add_hand(&hand?);
                Ok(stats)
            },
        )
        .try_reduce(
            || Stats::new(variant),
            |mut a, b| {
                a.merge(b)?;
                Ok(a)
            },
        )
}
