//! Winning-shape statistics for enumerated 14-tile and 11-tile hands.
//!
//! The pipeline for a single hand is:
//!
//! 1. [`hand::Hand`] holds the canonical sorted tiles.
//! 2. [`algo::agari::evaluate`] removes each candidate pair, splits the rest
//!    with [`algo::meld::scan_melds`], classifies it with
//!    [`algo::yaku::classify`] and scores it with [`algo::score::combine`].
//! 3. [`stats::Stats::record`] adds the best result, weighted by
//!    [`stats::combinations`].
//!
//! [`dataset`] drives this over a record file, sequentially or with rayon.

pub mod algo;
pub mod dataset;
pub mod hand;
pub mod stats;
pub mod tile;
