//! Splits the tiles left after removing a pair into runs and triplets.
//!
//! The scan is a single greedy pass over the sorted tiles and never
//! backtracks. At the lowest unused position it first tries the three tiles
//! starting there as a meld. If that fails it looks for a run made of the
//! nearest unused tiles holding the next two values, skipping over tiles of
//! the current value. Any gap fails the whole scan.
use crate::hand::tiles_to_string;
use crate::tile::{Tile, Variant};
use std::fmt::Write;
use derive_more::{Display, Error};
use tinyvec::ArrayVec;

pub const MAX_MELDS: usize = 4;

pub type Melds = ArrayVec<[Meld; MAX_MELDS]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MeldKind {
    #[default]
    Run,
    Triplet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Meld {
    pub kind: MeldKind,
    /// In ascending order.
    pub tiles: [Tile; 3],
}

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[display("{len} tiles cannot be split into melds")]
    Length { len: usize },
    #[display("no unused tile to extend a run from position {at}")]
    Exhausted { at: usize },
    #[display("tiles from position {at} do not form a meld")]
    NotMeld { at: usize },
}

/// A pair plus the melds the scan found, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Div {
    pub pair: Tile,
    pub melds: Melds,
}

impl Meld {
    /// Classifies three ascending tiles, `None` if they are neither a
    /// triplet nor a run.
    #[must_use]
    pub const fn new(variant: Variant, tiles: [Tile; 3]) -> Option<Self> {
        let [a, b, c] = tiles;
        if a.as_u8() == b.as_u8() && b.as_u8() == c.as_u8() {
            Some(Self { kind: MeldKind::Triplet, tiles })
        } else if variant.can_start_run(a)
            && variant.is_successor(a, b)
            && variant.is_successor(b, c)
        {
            Some(Self { kind: MeldKind::Run, tiles })
        } else {
            None
        }
    }

    /// Lowest tile: the start of a run or the tile of a triplet.
    #[inline]
    pub const fn head(&self) -> Tile {
        self.tiles[0]
    }

    #[inline]
    pub const fn is_run(&self) -> bool {
        matches!(self.kind, MeldKind::Run)
    }

    #[inline]
    pub const fn is_triplet(&self) -> bool {
        matches!(self.kind, MeldKind::Triplet)
    }

    /// Either end is a terminal. Only the ends of a run can be.
    #[inline]
    pub const fn has_terminal(&self, variant: Variant) -> bool {
        variant.is_terminal(self.tiles[0]) || variant.is_terminal(self.tiles[2])
    }
}

impl Div {
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        [self.pair; 2]
            .into_iter()
            .chain(self.melds.iter().flat_map(|m| m.tiles))
    }

    pub fn runs(&self) -> impl Iterator<Item = &Meld> + '_ {
        self.melds.iter().filter(|m| m.is_run())
    }

    pub fn triplets(&self) -> impl Iterator<Item = &Meld> + '_ {
        self.melds.iter().filter(|m| m.is_triplet())
    }

    /// Pair first, then each meld, e.g. `[CC] 234s 345m EEE`.
    pub fn to_log_string(&self, variant: Variant) -> String {
        let mut s = format!("[{}]", tiles_to_string(variant, &[self.pair; 2]));
        for m in &self.melds {
            write!(s, " {}", tiles_to_string(variant, &m.tiles)).ok();
        }
        s
    }
}

/// Greedily splits ascending `tiles` into melds.
pub fn scan_melds(variant: Variant, tiles: &[Tile]) -> Result<Melds, ScanError> {
    let n = tiles.len();
    if n % 3 != 0 || n / 3 > MAX_MELDS {
        return Err(ScanError::Length { len: n });
    }

    let mut used = [false; MAX_MELDS * 3];
    let mut melds = Melds::new();
    let mut i = 0;
    while i < n {
        if used[i] {
            i += 1;
            continue;
        }

        if i + 2 < n && !used[i + 1] && !used[i + 2] {
            if let Some(meld) = Meld::new(variant, [tiles[i], tiles[i + 1], tiles[i + 2]]) {
                used[i..i + 3].fill(true);
                melds.push(meld);
                i += 3;
                continue;
            }
        }

        let j = next_distinct(tiles, &used, i).ok_or(ScanError::Exhausted { at: i })?;
        let l = next_distinct(tiles, &used, j).ok_or(ScanError::Exhausted { at: j })?;
        let meld = Meld::new(variant, [tiles[i], tiles[j], tiles[l]])
            .ok_or(ScanError::NotMeld { at: i })?;
        used[i] = true;
        used[j] = true;
        used[l] = true;
        melds.push(meld);
    }

    Ok(melds)
}

/// First unused position after `from` whose tile differs from `tiles[from]`.
fn next_distinct(tiles: &[Tile], used: &[bool], from: usize) -> Option<usize> {
    (from + 1..tiles.len()).find(|&k| !used[k] && tiles[k] != tiles[from])
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::hand::parse_tiles;

    fn sorted(variant: Variant, s: &str) -> Vec<Tile> {
        let mut tiles = parse_tiles(variant, s).unwrap();
        tiles.sort_unstable();
        tiles
    }

    fn scan(variant: Variant, s: &str) -> Result<Melds, ScanError> {
        scan_melds(variant, &sorted(variant, s))
    }

    fn assert_valid(variant: Variant, s: &str) {
        let tiles = sorted(variant, s);
        let melds = scan_melds(variant, &tiles).unwrap_or_else(|e| panic!("{s}: {e}"));
        assert_eq!(melds.len() * 3, tiles.len(), "{s}");

        let mut flat: Vec<_> = melds.iter().flat_map(|m| m.tiles).collect();
        flat.sort_unstable();
        assert_eq!(flat, tiles, "{s} is not a permutation");
        for m in &melds {
            assert_eq!(Meld::new(variant, m.tiles), Some(*m), "{s}");
        }
    }

    #[test]
    pub fn meld_shapes() {
        let v = Variant::Four;
        let t = |s| {
            let tiles = sorted(v, s);
            Meld::new(v, [tiles[0], tiles[1], tiles[2]])
        };
        assert!(t("555p").unwrap().is_triplet());
        assert!(t("EEE").unwrap().is_triplet());
        assert!(t("789s").unwrap().is_run());
        assert!(t("789s").unwrap().has_terminal(v));
        assert!(!t("456s").unwrap().has_terminal(v));
        assert_eq!(t("ESW"), None);
        assert_eq!(t("135m"), None);
        // 8s 9s 1m are adjacent indices in different suits
        let b8 = v.suited(crate::tile::Suit::Bamboo, 8).unwrap();
        let b9 = v.suited(crate::tile::Suit::Bamboo, 9).unwrap();
        let c1 = v.suited(crate::tile::Suit::Character, 1).unwrap();
        assert_eq!(Meld::new(v, [b8, b9, c1]), None);

        let v = Variant::Three;
        let tiles = sorted(v, "456m");
        assert!(Meld::new(v, [tiles[0], tiles[1], tiles[2]]).unwrap().has_terminal(v));
    }

    #[test]
    pub fn direct_melds() {
        let melds = scan(Variant::Four, "123s 456s 789s 111m").unwrap();
        assert_eq!(melds.len(), 4);
        assert!(melds[..3].iter().all(Meld::is_run));
        assert!(melds[3].is_triplet());

        assert_valid(Variant::Four, "EEE SSS CCC 999p");
        assert_valid(Variant::Three, "111s 456m 666p");
    }

    #[test]
    pub fn split_runs() {
        let melds = scan(Variant::Four, "112233s").unwrap();
        assert_eq!(melds.len(), 2);
        assert!(melds.iter().all(|m| m.is_run() && m.head() == melds[0].head()));

        assert_valid(Variant::Four, "122334m");
        assert_valid(Variant::Four, "233334p 789p");
        assert_valid(Variant::Four, "111122223333m");
        assert_valid(Variant::Four, "111234s 234s 567m");
        assert_valid(Variant::Three, "112233m 456p");
    }

    #[test]
    pub fn discovery_order() {
        let melds = scan(Variant::Four, "222234s").unwrap();
        assert_eq!(melds[0].kind, MeldKind::Triplet);
        assert_eq!(melds[1].kind, MeldKind::Run);

        // four identical runs come out as triplet, run, triplet, triplet
        let melds = scan(Variant::Four, "111122223333s").unwrap();
        let kinds: Vec<_> = melds.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, [MeldKind::Triplet, MeldKind::Run, MeldKind::Triplet, MeldKind::Triplet]);
    }

    #[test]
    pub fn failures() {
        assert_eq!(scan(Variant::Four, "1234s"), Err(ScanError::Length { len: 4 }));
        assert!(scan(Variant::Four, "122333m").is_err());
        // the next distinct values sit in another suit
        assert!(scan(Variant::Four, "89s 1m 555p").is_err());
        assert!(scan(Variant::Four, "89s 1m").is_err());
        assert!(scan(Variant::Four, "ESW").is_err());
        assert!(matches!(scan(Variant::Four, "122m"), Err(ScanError::Exhausted { .. })));
        assert!(matches!(scan(Variant::Four, "124m"), Err(ScanError::NotMeld { at: 0 })));
        assert!(scan(Variant::Three, "56m 1p").is_err());
        assert_eq!(scan(Variant::Four, "").map(|m| m.len()), Ok(0));
    }

    #[test]
    pub fn div_helpers() {
        let v = Variant::Four;
        let melds = scan(v, "234s EEE 345m 567p").unwrap();
        let div = Div {
            pair: v.honor_from_letter('C').unwrap(),
            melds,
        };
        assert_eq!(div.tiles().count(), 14);
        assert_eq!(div.runs().count(), 3);
        assert_eq!(div.triplets().count(), 1);
        assert_eq!(div.to_log_string(v), "[CC] EEE 234s 345m 567p");
    }
}
