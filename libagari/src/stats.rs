//! Weighted per-pattern statistics.
//!
//! Each canonical hand stands for every physical draw of the same tiles, so
//! everything it adds is multiplied by [`combinations`].
use crate::algo::agari::evaluate;
use crate::algo::score::Outcome;
use crate::algo::yaku::Yaku;
use crate::hand::Hand;
use crate::tile::Variant;
use anyhow::{Result, ensure};
use derive_more::{Add, AddAssign, Sum};
use serde::Serialize;

/// Number of physical draws of `hand` from a set holding four copies of
/// every tile, i.e. the product of `C(4, count)` over its tile values.
pub fn combinations(hand: &Hand) -> u64 {
    hand.counts().iter().map(|&c| copies_choose(c)).product()
}

#[inline]
const fn copies_choose(count: u8) -> u64 {
    match count {
        0 | 4 => 1,
        1 | 3 => 4,
        2 => 6,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Add, AddAssign, Sum, Serialize)]
pub struct Row {
    /// Canonical hands credited.
    pub hands: u64,
    /// Physical draws credited.
    pub combinations: u64,
    /// Score times weight, summed.
    pub score_sum: u64,
}

impl Row {
    /// Weighted average score, `None` without any combinations.
    pub fn average(&self) -> Option<f64> {
        (self.combinations > 0).then(|| self.score_sum as f64 / self.combinations as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    variant: Variant,
    rows: [Row; Yaku::COUNT],
    total_score: u64,
    total_combinations: u64,
    records: u64,
}

impl Stats {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            rows: [Row::default(); Yaku::COUNT],
            total_score: 0,
            total_combinations: 0,
            records: 0,
        }
    }

    /// Evaluates `hand` and records its best outcome.
    pub fn add_hand(&mut self, hand: &Hand) {
        let best = evaluate(hand);
        self.record(combinations(hand), best.as_ref().map(|e| &e.outcome));
    }

    /// Adds one hand of weight `weight`.
    ///
    /// Every pattern credited by `best` gets the hand and its weight. Additive
    /// patterns record the hand's score, jackpot patterns their own tier.
    /// Without an outcome the hand goes to [`Yaku::NoPattern`].
    pub fn record(&mut self, weight: u64, best: Option<&Outcome>) {
        self.records += 1;
        self.total_combinations += weight;

        let Some(outcome) = best else {
            self.rows[Yaku::NoPattern.as_usize()] += Row {
                hands: 1,
                combinations: weight,
                score_sum: 0,
            };
            return;
        };

        for y in outcome.yaku().iter() {
            self.rows[y.as_usize()] += Row {
                hands: 1,
                combinations: weight,
                score_sum: u64::from(outcome.row_value(self.variant, y)) * weight,
            };
        }
        self.total_score += u64::from(outcome.value()) * weight;
    }

    /// Field-wise sum. Both sides must describe the same variant.
    pub fn merge(&mut self, other: Self) -> Result<()> {
        ensure!(
            self.variant == other.variant,
            "cannot merge {} stats into {} stats",
            other.variant,
            self.variant,
        );
        for (a, b) in self.rows.iter_mut().zip(other.rows) {
            *a += b;
        }
        self.total_score += other.total_score;
        self.total_combinations += other.total_combinations;
        self.records += other.records;
        Ok(())
    }

    #[inline]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub const fn row(&self, yaku: Yaku) -> Row {
        self.rows[yaku.as_usize()]
    }

    /// Rows of the variant's catalog in report order.
    pub fn rows(&self) -> impl Iterator<Item = (Yaku, Row)> + '_ {
        Yaku::catalog(self.variant)
            .iter()
            .map(|&y| (y, self.row(y)))
    }

    #[inline]
    pub const fn total_score(&self) -> u64 {
        self.total_score
    }

    /// Physical draws over every recorded hand.
    #[inline]
    pub const fn total_combinations(&self) -> u64 {
        self.total_combinations
    }

    /// Combinations summed over every row, so a hand counts once per
    /// pattern it is credited to.
    pub fn pattern_combinations(&self) -> u64 {
        self.rows.iter().map(|r| r.combinations).sum()
    }

    #[inline]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Total weighted score over [`Self::pattern_combinations`], the
    /// headline figure of the report.
    pub fn average(&self) -> Option<f64> {
        let combinations = self.pattern_combinations();
        (combinations > 0).then(|| self.total_score as f64 / combinations as f64)
    }
}
