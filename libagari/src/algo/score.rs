//! Turns a [`YakuSet`] into a score.
use super::yaku::{Family, Points, Yaku, YakuSet};
use crate::tile::Variant;

const FAMILIES: usize = Family::Concealed as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Only the jackpot patterns that fired, valued at the highest of them.
    Jackpot { value: u32, yaku: YakuSet },
    /// Capped sum of the additive patterns.
    Additive { value: u32, yaku: YakuSet },
}

impl Outcome {
    #[inline]
    #[must_use]
    pub const fn value(&self) -> u32 {
        match *self {
            Self::Jackpot { value, .. } | Self::Additive { value, .. } => value,
        }
    }

    /// Patterns credited with this outcome.
    #[inline]
    #[must_use]
    pub const fn yaku(&self) -> YakuSet {
        match *self {
            Self::Jackpot { yaku, .. } | Self::Additive { yaku, .. } => yaku,
        }
    }

    /// Score recorded in the row of `yaku`. A jackpot row gets its own tier
    /// value, an additive row gets the whole hand's value.
    #[inline]
    #[must_use]
    pub const fn row_value(&self, variant: Variant, yaku: Yaku) -> u32 {
        match *self {
            Self::Jackpot { .. } => yaku.base_value(variant),
            Self::Additive { value, .. } => value,
        }
    }

    #[inline]
    pub const fn is_jackpot(&self) -> bool {
        matches!(self, Self::Jackpot { .. })
    }
}

#[inline]
#[must_use]
pub const fn cap(variant: Variant, score: u32) -> u32 {
    let max = variant.score_cap();
    if score > max { max } else { score }
}

/// Scores the patterns of one decomposition.
///
/// Any jackpot pattern voids the additive ones. Otherwise every family
/// contributes its best member, independent patterns add up, value honors
/// pay per triplet and the sum is capped.
pub fn combine(variant: Variant, set: YakuSet) -> Outcome {
    let mut jackpot = YakuSet::default();
    let mut jackpot_value = 0;
    for y in set.iter() {
        if let Some(Points::Jackpot(p)) = y.points(variant) {
            jackpot.insert(y);
            jackpot_value = jackpot_value.max(p);
        }
    }
    if !jackpot.is_empty() {
        return Outcome::Jackpot {
            value: jackpot_value,
            yaku: jackpot,
        };
    }

    let mut best_in_family = [0; FAMILIES];
    let mut sum = 0;
    for y in set.iter() {
        match (y.points(variant), y.family()) {
            (Some(Points::Additive(p)), Some(f)) => {
                let best = &mut best_in_family[f as usize];
                *best = (*best).max(p);
            }
            (Some(Points::Additive(p)), None) => sum += p,
            (Some(Points::PerTriplet(p)), _) => sum += p * u32::from(set.value_honors()),
            _ => (),
        }
    }
    sum += best_in_family.iter().sum::<u32>();

    Outcome::Additive {
        value: cap(variant, sum),
        yaku: set,
    }
}

/// Shorthand for `combine(variant, set).value()`.
pub fn score(variant: Variant, set: YakuSet) -> u32 {
    combine(variant, set).value()
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::algo::yaku::classify;
    use crate::algo::yaku::test::div;

    fn value(variant: Variant, pair: &str, rest: &str) -> u32 {
        score(variant, classify(variant, &div(variant, pair, rest)))
    }

    #[test]
    pub fn additive() {
        let v = Variant::Four;
        assert_eq!(value(v, "9s", "234s 345m 456p 678m"), 5);
        // all runs + pure double run + full flush + pure straight
        assert_eq!(value(v, "9s", "123s 123s 456s 789s"), 5 + 10 + 80 + 30);
        // three value honors and a half flush, no dragon bonus without a dragon pair
        assert_eq!(value(v, "S", "CCC EEE FFF 234m"), 30 + 40);

        let v = Variant::Three;
        assert_eq!(value(v, "F", "CCC 123m 456p"), 20);
        // one concealed triplet pays nothing
        assert_eq!(value(v, "C", "222s 456m 123p"), 0);
        assert_eq!(value(v, "C", "123s 123m 123p"), 5 + 35);
    }

    #[test]
    pub fn caps() {
        let v = Variant::Four;
        // all triplets 40 + full flush 80 + four shifted 200
        assert_eq!(value(v, "9m", "111222333444m"), 320);
        // little four winds 200 + terminals 120 + all triplets 40 + half flush 40 + East 10
        assert_eq!(value(v, "N", "EEE SSS WWW 111m"), 320);

        let v = Variant::Three;
        // all triplets 40 + full flush 80 + three shifted 80 + three concealed 0
        assert_eq!(value(v, "6s", "111222333s"), 160);

        for v in Variant::ALL {
            for x in [0, 1, 159, 160, 161, 320, 321, 10_000] {
                assert_eq!(cap(v, cap(v, x)), cap(v, x));
                assert!(cap(v, x) <= v.score_cap());
            }
        }
    }

    #[test]
    pub fn jackpots() {
        let v = Variant::Four;
        let o = combine(v, classify(v, &div(v, "C", "EEE SSS WWW NNN")));
        assert_eq!(o.value(), 400);
        assert!(o.is_jackpot());
        // mixed terminals, all triplets and the rest are voided
        assert_eq!(
            o.yaku().iter().collect::<Vec<_>>(),
            [Yaku::BigFourWinds, Yaku::AllHonors],
        );
        // each jackpot row keeps its own tier
        assert_eq!(o.row_value(v, Yaku::BigFourWinds), 400);
        assert_eq!(o.row_value(v, Yaku::AllHonors), 320);

        assert_eq!(value(v, "E", "111122223333s"), 480);
        assert_eq!(value(v, "1s", "999s 111m 999m 111p"), 400);
        assert_eq!(value(v, "E", "SSS WWW NNN CCC"), 320);

        let v = Variant::Three;
        assert_eq!(value(v, "1s", "CCC FFF PPP"), 200);
        assert_eq!(value(v, "1s", "666s 111m 666p"), 200);
    }

    #[test]
    pub fn best_in_family() {
        let v = Variant::Four;
        let set: YakuSet = [Yaku::HalfFlush, Yaku::FullFlush, Yaku::AllRuns].into_iter().collect();
        assert_eq!(score(v, set), 85);
        let set: YakuSet = [Yaku::ThreeShiftedTriplets, Yaku::FourShiftedTriplets]
            .into_iter()
            .collect();
        assert_eq!(score(v, set), 200);

        // additive rows all carry the hand's value
        let o = combine(v, [Yaku::HalfFlush, Yaku::AllRuns].into_iter().collect());
        assert_eq!(o.row_value(v, Yaku::AllRuns), 45);
        assert_eq!(o.row_value(v, Yaku::HalfFlush), 45);
        assert_eq!(score(v, YakuSet::default()), 0);
    }
}
