//! Pattern catalog and the classifier that finds every pattern a
//! decomposition satisfies.
//!
//! The classifier only reports facts about the shape. Deciding which
//! patterns pay is [`super::score::combine`]'s job. Predicates in one
//! [`Family`] never report more than one member for the same [`Div`].
use super::meld::{Div, MAX_MELDS, Meld};
use crate::tile::{Suit, Tile, Variant};
use std::fmt;
use tinyvec::ArrayVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Yaku {
    /// 無役
    NoPattern,
    /// 平和
    AllRuns,
    /// 番牌
    ValueHonors,
    /// 斷么
    AllSimples,
    /// 一氣通貫
    PureStraight,
    /// 混全帶么
    MixedOutside,
    /// 純全帶么
    PureOutside,
    /// 混老頭
    MixedTerminals,
    /// 一般高
    PureDoubleRun,
    /// 二般高
    TwicePureDoubleRun,
    /// 三色同順
    MixedTripleRun,
    /// 三色同刻
    TripleTriplet,
    /// 對對和
    AllTriplets,
    /// 混一色
    HalfFlush,
    /// 清一色
    FullFlush,
    /// 一暗刻
    OneConcealedTriplet,
    /// 二暗刻
    TwoConcealedTriplets,
    /// 三暗刻
    ThreeConcealedTriplets,
    /// 二連刻
    TwoShiftedTriplets,
    /// 三連刻
    ThreeShiftedTriplets,
    /// 四連刻
    FourShiftedTriplets,
    /// 小三元
    LittleThreeDragons,
    /// 大三元
    BigThreeDragons,
    /// 小四喜
    LittleFourWinds,
    /// 大四喜
    BigFourWinds,
    /// 字一色
    AllHonors,
    /// 清老頭
    AllTerminals,
    /// 一色四同順
    QuadrupleRun,
}

/// Groups of patterns of which at most one can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Terminal,
    RepeatedRuns,
    CrossSuit,
    Flush,
    Honors,
    Shifted,
    Concealed,
}

/// How a pattern contributes to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Points {
    /// Replaces every additive pattern.
    Jackpot(u32),
    Additive(u32),
    /// Paid once per value-honor triplet.
    PerTriplet(u32),
}

/// Patterns fired by one decomposition, plus the number of value-honor
/// triplets backing [`Yaku::ValueHonors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct YakuSet {
    bits: u32,
    value_honors: u8,
}

const FOUR_CATALOG: [Yaku; 24] = [
    Yaku::NoPattern,
    Yaku::AllRuns,
    Yaku::ValueHonors,
    Yaku::AllSimples,
    Yaku::PureStraight,
    Yaku::MixedOutside,
    Yaku::PureOutside,
    Yaku::MixedTerminals,
    Yaku::PureDoubleRun,
    Yaku::TwicePureDoubleRun,
    Yaku::MixedTripleRun,
    Yaku::TripleTriplet,
    Yaku::AllTriplets,
    Yaku::HalfFlush,
    Yaku::FullFlush,
    Yaku::ThreeShiftedTriplets,
    Yaku::FourShiftedTriplets,
    Yaku::LittleThreeDragons,
    Yaku::BigThreeDragons,
    Yaku::LittleFourWinds,
    Yaku::BigFourWinds,
    Yaku::AllHonors,
    Yaku::AllTerminals,
    Yaku::QuadrupleRun,
];

const THREE_CATALOG: [Yaku; 19] = [
    Yaku::NoPattern,
    Yaku::AllRuns,
    Yaku::ValueHonors,
    Yaku::PureStraight,
    Yaku::MixedTerminals,
    Yaku::PureDoubleRun,
    Yaku::MixedTripleRun,
    Yaku::AllTriplets,
    Yaku::HalfFlush,
    Yaku::FullFlush,
    Yaku::OneConcealedTriplet,
    Yaku::TwoConcealedTriplets,
    Yaku::ThreeConcealedTriplets,
    Yaku::TwoShiftedTriplets,
    Yaku::ThreeShiftedTriplets,
    Yaku::LittleThreeDragons,
    Yaku::TripleTriplet,
    Yaku::AllTerminals,
    Yaku::BigThreeDragons,
];

impl Yaku {
    pub const COUNT: usize = Self::QuadrupleRun as usize + 1;

    pub const ALL: [Self; Self::COUNT] = [
        Self::NoPattern,
        Self::AllRuns,
        Self::ValueHonors,
        Self::AllSimples,
        Self::PureStraight,
        Self::MixedOutside,
        Self::PureOutside,
        Self::MixedTerminals,
        Self::PureDoubleRun,
        Self::TwicePureDoubleRun,
        Self::MixedTripleRun,
        Self::TripleTriplet,
        Self::AllTriplets,
        Self::HalfFlush,
        Self::FullFlush,
        Self::OneConcealedTriplet,
        Self::TwoConcealedTriplets,
        Self::ThreeConcealedTriplets,
        Self::TwoShiftedTriplets,
        Self::ThreeShiftedTriplets,
        Self::FourShiftedTriplets,
        Self::LittleThreeDragons,
        Self::BigThreeDragons,
        Self::LittleFourWinds,
        Self::BigFourWinds,
        Self::AllHonors,
        Self::AllTerminals,
        Self::QuadrupleRun,
    ];

    /// Patterns of `variant` in report order, starting with
    /// [`Yaku::NoPattern`].
    pub const fn catalog(variant: Variant) -> &'static [Self] {
        match variant {
            Variant::Four => &FOUR_CATALOG,
            Variant::Three => &THREE_CATALOG,
        }
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NoPattern => "No Pattern",
            Self::AllRuns => "All Runs",
            Self::ValueHonors => "Value Honors",
            Self::AllSimples => "All Simples",
            Self::PureStraight => "Pure Straight",
            Self::MixedOutside => "Mixed Outside Hand",
            Self::PureOutside => "Pure Outside Hand",
            Self::MixedTerminals => "All Terminals and Honors",
            Self::PureDoubleRun => "Pure Double Run",
            Self::TwicePureDoubleRun => "Twice Pure Double Run",
            Self::MixedTripleRun => "Mixed Triple Run",
            Self::TripleTriplet => "Triple Triplets",
            Self::AllTriplets => "All Triplets",
            Self::HalfFlush => "Half Flush",
            Self::FullFlush => "Full Flush",
            Self::OneConcealedTriplet => "One Concealed Triplet",
            Self::TwoConcealedTriplets => "Two Concealed Triplets",
            Self::ThreeConcealedTriplets => "Three Concealed Triplets",
            Self::TwoShiftedTriplets => "Two Shifted Triplets",
            Self::ThreeShiftedTriplets => "Three Shifted Triplets",
            Self::FourShiftedTriplets => "Four Shifted Triplets",
            Self::LittleThreeDragons => "Little Three Dragons",
            Self::BigThreeDragons => "Big Three Dragons",
            Self::LittleFourWinds => "Little Four Winds",
            Self::BigFourWinds => "Big Four Winds",
            Self::AllHonors => "All Honors",
            Self::AllTerminals => "All Terminals",
            Self::QuadrupleRun => "Quadruple Run",
        }
    }

    pub const fn family(self) -> Option<Family> {
        Some(match self {
            Self::MixedOutside | Self::PureOutside | Self::MixedTerminals | Self::AllTerminals => {
                Family::Terminal
            }
            Self::PureDoubleRun | Self::TwicePureDoubleRun | Self::QuadrupleRun => {
                Family::RepeatedRuns
            }
            Self::MixedTripleRun | Self::TripleTriplet => Family::CrossSuit,
            Self::HalfFlush | Self::FullFlush | Self::AllHonors => Family::Flush,
            Self::LittleThreeDragons
            | Self::BigThreeDragons
            | Self::LittleFourWinds
            | Self::BigFourWinds => Family::Honors,
            Self::TwoShiftedTriplets | Self::ThreeShiftedTriplets | Self::FourShiftedTriplets => {
                Family::Shifted
            }
            Self::OneConcealedTriplet
            | Self::TwoConcealedTriplets
            | Self::ThreeConcealedTriplets => Family::Concealed,
            Self::NoPattern
            | Self::AllRuns
            | Self::ValueHonors
            | Self::AllSimples
            | Self::PureStraight
            | Self::AllTriplets => return None,
        })
    }

    /// `None` for [`Yaku::NoPattern`] and for patterns outside the
    /// variant's catalog.
    pub const fn points(self, variant: Variant) -> Option<Points> {
        use Points::*;

        let p = match variant {
            Variant::Four => match self {
                Self::AllRuns => Additive(5),
                Self::ValueHonors => PerTriplet(10),
                Self::AllSimples => Additive(5),
                Self::PureStraight => Additive(30),
                Self::MixedOutside => Additive(30),
                Self::PureOutside => Additive(40),
                Self::MixedTerminals => Additive(120),
                Self::PureDoubleRun => Additive(10),
                Self::TwicePureDoubleRun => Additive(55),
                Self::MixedTripleRun => Additive(20),
                Self::TripleTriplet => Additive(120),
                Self::AllTriplets => Additive(40),
                Self::HalfFlush => Additive(40),
                Self::FullFlush => Additive(80),
                Self::ThreeShiftedTriplets => Additive(80),
                Self::FourShiftedTriplets => Additive(200),
                Self::LittleThreeDragons => Additive(60),
                Self::BigThreeDragons => Additive(130),
                Self::LittleFourWinds => Additive(200),
                Self::BigFourWinds => Jackpot(400),
                Self::AllHonors => Jackpot(320),
                Self::AllTerminals => Jackpot(400),
                Self::QuadrupleRun => Jackpot(480),
                _ => return None,
            },
            Variant::Three => match self {
                Self::AllRuns => Additive(5),
                Self::ValueHonors => PerTriplet(20),
                Self::PureStraight => Additive(10),
                Self::MixedTerminals => Additive(80),
                Self::PureDoubleRun => Additive(20),
                Self::MixedTripleRun => Additive(35),
                Self::TripleTriplet => Additive(120),
                Self::AllTriplets => Additive(40),
                Self::HalfFlush => Additive(40),
                Self::FullFlush => Additive(80),
                Self::OneConcealedTriplet
                | Self::TwoConcealedTriplets
                | Self::ThreeConcealedTriplets => Additive(0),
                Self::TwoShiftedTriplets => Additive(20),
                Self::ThreeShiftedTriplets => Additive(80),
                Self::LittleThreeDragons => Additive(80),
                Self::BigThreeDragons => Jackpot(200),
                Self::AllTerminals => Jackpot(200),
                _ => return None,
            },
        };
        Some(p)
    }

    /// Value of this pattern alone, ignoring value-honor multiples.
    pub const fn base_value(self, variant: Variant) -> u32 {
        match self.points(variant) {
            Some(Points::Jackpot(p) | Points::Additive(p) | Points::PerTriplet(p)) => p,
            None => 0,
        }
    }

    #[inline]
    pub const fn is_jackpot(self, variant: Variant) -> bool {
        matches!(self.points(variant), Some(Points::Jackpot(_)))
    }
}

impl fmt::Display for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl YakuSet {
    #[inline]
    pub const fn insert(&mut self, yaku: Yaku) {
        self.bits |= 1 << yaku as u32;
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, yaku: Yaku) -> bool {
        self.bits & (1 << yaku as u32) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub const fn value_honors(self) -> u8 {
        self.value_honors
    }

    pub const fn set_value_honors(&mut self, n: u8) {
        self.value_honors = n;
        if n > 0 {
            self.insert(Yaku::ValueHonors);
        }
    }

    /// Members in [`Yaku::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Yaku> {
        Yaku::ALL.into_iter().filter(move |&y| self.contains(y))
    }
}

impl fmt::Display for YakuSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (i, y) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match y {
                Yaku::ValueHonors => write!(f, "{y} x{}", self.value_honors)?,
                _ => write!(f, "{y}")?,
            }
        }
        Ok(())
    }
}

impl FromIterator<Yaku> for YakuSet {
    fn from_iter<I: IntoIterator<Item = Yaku>>(iter: I) -> Self {
        let mut set = Self::default();
        for y in iter {
            set.insert(y);
        }
        set
    }
}

type Heads = ArrayVec<[Tile; MAX_MELDS]>;

/// Every pattern `div` satisfies under `variant`'s catalog.
pub fn classify(variant: Variant, div: &Div) -> YakuSet {
    let mut set = YakuSet::default();
    let mut fire = |y: Option<Yaku>| {
        if let Some(y) = y {
            set.insert(y);
        }
    };

    let all_runs = div.melds.iter().all(Meld::is_run);
    let all_triplets = div.melds.iter().all(Meld::is_triplet);

    fire(all_runs.then_some(Yaku::AllRuns));
    fire(all_triplets.then_some(Yaku::AllTriplets));
    if matches!(variant, Variant::Four) {
        fire(div.tiles().all(|t| variant.is_simple(t)).then_some(Yaku::AllSimples));
    }
    fire(pure_straight(variant, div).then_some(Yaku::PureStraight));
    fire(terminal(variant, div, all_triplets));
    fire(repeated_runs(variant, div, all_runs));
    fire(cross_suit(variant, div));
    fire(flush(variant, div));
    fire(honors(variant, div));
    fire(shifted(variant, div));
    if matches!(variant, Variant::Three) {
        fire(match div.triplets().count() {
            1 => Some(Yaku::OneConcealedTriplet),
            2 => Some(Yaku::TwoConcealedTriplets),
            3 => Some(Yaku::ThreeConcealedTriplets),
            _ => None,
        });
    }

    let value_honors = div
        .triplets()
        .filter(|m| variant.is_value_honor(m.head()))
        .count();
    set.set_value_honors(value_honors as u8);
    set
}

/// Runs starting at 1, 4 and 7 of one suit (1 and 4 when the suit has six
/// ranks).
fn pure_straight(variant: Variant, div: &Div) -> bool {
    let starts: &[u8] = match variant {
        Variant::Four => &[1, 4, 7],
        Variant::Three => &[1, 4],
    };
    let heads: Heads = div.runs().map(Meld::head).collect();
    Suit::NUMBERED.into_iter().any(|suit| {
        starts
            .iter()
            .all(|&r| variant.suited(suit, r).is_some_and(|t| heads.contains(&t)))
    })
}

fn terminal(variant: Variant, div: &Div, all_triplets: bool) -> Option<Yaku> {
    let v = variant;
    let pair = div.pair;
    if all_triplets {
        if v.is_terminal(pair) && div.melds.iter().all(|m| v.is_terminal(m.head())) {
            return Some(Yaku::AllTerminals);
        }
        if v.is_terminal_or_honor(pair)
            && div.melds.iter().all(|m| v.is_terminal_or_honor(m.head()))
        {
            return Some(Yaku::MixedTerminals);
        }
    }
    if matches!(v, Variant::Three) {
        return None;
    }

    if v.is_terminal(pair) && div.melds.iter().all(|m| m.has_terminal(v)) {
        return Some(Yaku::PureOutside);
    }
    if v.is_terminal_or_honor(pair)
        && div
            .melds
            .iter()
            .all(|m| m.has_terminal(v) || v.is_honor(m.head()))
    {
        return Some(Yaku::MixedOutside);
    }
    None
}

fn repeated_runs(variant: Variant, div: &Div, all_runs: bool) -> Option<Yaku> {
    let m = &div.melds;
    if matches!(variant, Variant::Four) && m.len() == 4 {
        // four copies of one run come out of the scan as 111 123 222 333
        if m[0].is_triplet()
            && m[1].is_run()
            && m[2].is_triplet()
            && m[3].is_triplet()
            && m[1].head() == m[0].head()
            && variant.is_successor(m[1].head(), m[2].head())
            && variant.is_successor(m[2].head(), m[3].head())
        {
            return Some(Yaku::QuadrupleRun);
        }
        if all_runs && m[0].head() == m[1].head() && m[2].head() == m[3].head() {
            return Some(Yaku::TwicePureDoubleRun);
        }
    }

    let heads: Heads = div.runs().map(Meld::head).collect();
    let repeated = heads
        .iter()
        .enumerate()
        .any(|(i, h)| heads[i + 1..].contains(h));
    repeated.then_some(Yaku::PureDoubleRun)
}

fn cross_suit(variant: Variant, div: &Div) -> Option<Yaku> {
    let in_every_suit = |heads: Heads| {
        (1..=variant.suit_width()).any(|r| {
            Suit::NUMBERED
                .into_iter()
                .all(|suit| variant.suited(suit, r).is_some_and(|t| heads.contains(&t)))
        })
    };

    if in_every_suit(div.triplets().map(Meld::head).collect()) {
        Some(Yaku::TripleTriplet)
    } else if in_every_suit(div.runs().map(Meld::head).collect()) {
        Some(Yaku::MixedTripleRun)
    } else {
        None
    }
}

fn flush(variant: Variant, div: &Div) -> Option<Yaku> {
    let mut suits = div
        .tiles()
        .map(|t| variant.suit_of(t))
        .filter(|&s| s != Suit::Honor);
    match suits.next() {
        None if matches!(variant, Variant::Four) => Some(Yaku::AllHonors),
        None => None,
        Some(first) if suits.all(|s| s == first) => {
            if div.tiles().any(|t| variant.is_honor(t)) {
                Some(Yaku::HalfFlush)
            } else {
                Some(Yaku::FullFlush)
            }
        }
        Some(_) => None,
    }
}

fn honors(variant: Variant, div: &Div) -> Option<Yaku> {
    let winds = div.triplets().filter(|m| variant.is_wind(m.head())).count();
    let dragons = div.triplets().filter(|m| variant.is_dragon(m.head())).count();

    if winds == 4 {
        Some(Yaku::BigFourWinds)
    } else if winds == 3 && variant.is_wind(div.pair) {
        Some(Yaku::LittleFourWinds)
    } else if dragons == 3 {
        Some(Yaku::BigThreeDragons)
    } else if dragons == 2 && variant.is_dragon(div.pair) {
        Some(Yaku::LittleThreeDragons)
    } else {
        None
    }
}

fn shifted(variant: Variant, div: &Div) -> Option<Yaku> {
    let heads: Heads = div.triplets().map(Meld::head).collect();
    let longest = heads
        .iter()
        .map(|&start| {
            let mut len = 1;
            let mut cur = start;
            while let Some(&next) = heads.iter().find(|&&t| variant.is_successor(cur, t)) {
                len += 1;
                cur = next;
            }
            len
        })
        .max()
        .unwrap_or(0);

    match (variant, longest) {
        (Variant::Four, 4) => Some(Yaku::FourShiftedTriplets),
        (Variant::Four, 3) | (Variant::Three, 3) => Some(Yaku::ThreeShiftedTriplets),
        (Variant::Three, 2) => Some(Yaku::TwoShiftedTriplets),
        _ => None,
    }
}
