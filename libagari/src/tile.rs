//! Tile layouts for the 14-tile and 11-tile games.
//!
//! Both alphabets list the honors first, followed by three numbered suits of
//! equal width:
//!
//! | Variant | Honors                                | Suits                      | Size |
//! |---------|---------------------------------------|----------------------------|------|
//! | `Four`  | Red Green White East South West North | Bamboo, Character, Dot 1-9 | 34   |
//! | `Three` | Red Green White                       | Bamboo, Character, Dot 1-6 | 21   |
//!
//! Suit and rank are always derived from the index through this layout. Two
//! tiles are never compared by raw index across a suit boundary.
use derive_more::Display;
use serde::Serialize;

/// Size of the largest alphabet, used for fixed count arrays.
pub const MAX_TILE_KINDS: usize = 34;
/// Physical copies of every tile in a set.
pub const COPIES: u8 = 4;

/// Honor letters in alphabet order: C (Red), F (Green), P (White), then the winds.
const HONOR_LETTERS: [char; 7] = ['C', 'F', 'P', 'E', 'S', 'W', 'N'];

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 14 tiles, four melds, full 34-tile alphabet.
    #[display("four")]
    Four,
    /// 11 tiles, three melds, no winds and no ranks 7-9.
    #[display("three")]
    Three,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Honor,
    Bamboo,
    Character,
    Dot,
}

impl Suit {
    pub const NUMBERED: [Self; 3] = [Self::Bamboo, Self::Character, Self::Dot];

    pub const fn letter(self) -> char {
        match self {
            Self::Honor => 'z',
            Self::Bamboo => 's',
            Self::Character => 'm',
            Self::Dot => 'p',
        }
    }

    const fn offset(self) -> u8 {
        match self {
            Self::Honor | Self::Bamboo => 0,
            Self::Character => 1,
            Self::Dot => 2,
        }
    }
}

/// Index into a [`Variant`]'s alphabet.
///
/// A `Tile` does not know which variant it belongs to; every accessor lives
/// on [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tile(u8);

impl Tile {
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Variant {
    pub const ALL: [Self; 2] = [Self::Four, Self::Three];

    #[inline]
    pub const fn hand_len(self) -> usize {
        self.meld_count() * 3 + 2
    }

    #[inline]
    pub const fn meld_count(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Three => 3,
        }
    }

    #[inline]
    pub const fn honor_count(self) -> u8 {
        match self {
            Self::Four => 7,
            Self::Three => 3,
        }
    }

    #[inline]
    pub const fn suit_width(self) -> u8 {
        match self {
            Self::Four => 9,
            Self::Three => 6,
        }
    }

    #[inline]
    pub const fn tile_kinds(self) -> u8 {
        self.honor_count() + 3 * self.suit_width()
    }

    /// Upper bound of an additive score.
    #[inline]
    pub const fn score_cap(self) -> u32 {
        match self {
            Self::Four => 320,
            Self::Three => 160,
        }
    }

    /// File the enumerator writes for this variant.
    pub const fn default_input(self) -> &'static str {
        match self {
            Self::Four => "patterns_general_four.dat",
            Self::Three => "patterns_general_three.dat",
        }
    }

    /// Checked constructor.
    #[must_use]
    pub const fn tile(self, id: u8) -> Option<Tile> {
        if id < self.tile_kinds() { Some(Tile(id)) } else { None }
    }

    /// The tile of `suit` at `rank` (1-based), `None` for honors or out of range ranks.
    #[must_use]
    pub const fn suited(self, suit: Suit, rank: u8) -> Option<Tile> {
        if matches!(suit, Suit::Honor) || rank == 0 || rank > self.suit_width() {
            return None;
        }
        Some(Tile(self.honor_count() + suit.offset() * self.suit_width() + rank - 1))
    }

    /// The `n`th honor (0-based) in alphabet order.
    #[must_use]
    pub const fn honor(self, n: u8) -> Option<Tile> {
        if n < self.honor_count() { Some(Tile(n)) } else { None }
    }

    pub fn tiles(self) -> impl Iterator<Item = Tile> {
        (0..self.tile_kinds()).map(Tile)
    }

    /// Record encoding: one byte per tile, `index + b'A'`.
    #[must_use]
    pub fn tile_from_byte(self, b: u8) -> Option<Tile> {
        b.checked_sub(b'A').and_then(|id| self.tile(id))
    }

    #[inline]
    #[must_use]
    pub const fn tile_to_byte(self, t: Tile) -> u8 {
        t.0 + b'A'
    }

    #[inline]
    #[must_use]
    pub const fn suit_of(self, t: Tile) -> Suit {
        if t.0 < self.honor_count() {
            return Suit::Honor;
        }
        match (t.0 - self.honor_count()) / self.suit_width() {
            0 => Suit::Bamboo,
            1 => Suit::Character,
            _ => Suit::Dot,
        }
    }

    /// 1-based rank within the suit, `None` for honors.
    #[inline]
    #[must_use]
    pub const fn rank_of(self, t: Tile) -> Option<u8> {
        if t.0 < self.honor_count() {
            None
        } else {
            Some((t.0 - self.honor_count()) % self.suit_width() + 1)
        }
    }

    #[inline]
    pub const fn is_honor(self, t: Tile) -> bool {
        t.0 < self.honor_count()
    }

    #[inline]
    pub const fn is_terminal(self, t: Tile) -> bool {
        matches!(self.rank_of(t), Some(r) if r == 1 || r == self.suit_width())
    }

    #[inline]
    pub const fn is_simple(self, t: Tile) -> bool {
        matches!(self.rank_of(t), Some(r) if r > 1 && r < self.suit_width())
    }

    #[inline]
    pub const fn is_terminal_or_honor(self, t: Tile) -> bool {
        !self.is_simple(t)
    }

    #[inline]
    pub const fn is_dragon(self, t: Tile) -> bool {
        t.0 < 3
    }

    #[inline]
    pub const fn is_wind(self, t: Tile) -> bool {
        matches!(self, Self::Four) && t.0 >= 3 && t.0 < 7
    }

    /// Honors whose triplets score on their own.
    ///
    /// The seat wind is fixed: East in the 14-tile game, and Red stands in
    /// for it in the 11-tile game, which has no winds. The 11-tile game does
    /// not score the other dragons individually.
    #[inline]
    pub const fn is_value_honor(self, t: Tile) -> bool {
        match self {
            Self::Four => t.0 <= 3,
            Self::Three => t.0 == 0,
        }
    }

    /// `b` is the rank right after `a` in the same numbered suit.
    #[inline]
    pub const fn is_successor(self, a: Tile, b: Tile) -> bool {
        match (self.rank_of(a), self.rank_of(b)) {
            (Some(ra), Some(rb)) => rb == ra + 1 && b.0 == a.0 + 1,
            _ => false,
        }
    }

    /// A run may start at `t` without leaving its suit.
    #[inline]
    pub const fn can_start_run(self, t: Tile) -> bool {
        matches!(self.rank_of(t), Some(r) if r + 2 <= self.suit_width())
    }

    pub fn tile_string(self, t: Tile) -> String {
        match self.rank_of(t) {
            Some(r) => format!("{r}{}", self.suit_of(t).letter()),
            None => HONOR_LETTERS[t.as_usize()].to_string(),
        }
    }

    /// Inverse of the honor letters used by [`Self::tile_string`].
    pub fn honor_from_letter(self, c: char) -> Option<Tile> {
        let n = HONOR_LETTERS.iter().position(|&l| l == c)?;
        self.honor(n as u8)
    }
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn layout() {
        assert_eq!(Variant::Four.tile_kinds(), 34);
        assert_eq!(Variant::Three.tile_kinds(), 21);
        assert_eq!(Variant::Four.hand_len(), 14);
        assert_eq!(Variant::Three.hand_len(), 11);

        for v in Variant::ALL {
            let suited = v.tiles().filter(|&t| !v.is_honor(t)).count();
            assert_eq!(suited, 3 * v.suit_width() as usize);
            for t in v.tiles() {
                match v.rank_of(t) {
                    Some(r) => assert_eq!(v.suited(v.suit_of(t), r), Some(t)),
                    None => assert_eq!(v.suit_of(t), Suit::Honor),
                }
                // exactly one category per tile
                let cats = [v.is_honor(t), v.is_terminal(t), v.is_simple(t)];
                assert_eq!(cats.iter().filter(|&&b| b).count(), 1, "{}", v.tile_string(t));
            }
        }
    }

    #[test]
    pub fn suit_boundaries() {
        let v = Variant::Four;
        let b9 = v.suited(Suit::Bamboo, 9).unwrap();
        let c1 = v.suited(Suit::Character, 1).unwrap();
        assert_eq!(b9.as_u8() + 1, c1.as_u8());
        assert!(!v.is_successor(b9, c1));
        assert!(!v.can_start_run(v.suited(Suit::Bamboo, 8).unwrap()));
        assert!(v.can_start_run(v.suited(Suit::Dot, 7).unwrap()));

        let v = Variant::Three;
        assert!(v.can_start_run(v.suited(Suit::Dot, 4).unwrap()));
        assert!(!v.can_start_run(v.suited(Suit::Dot, 5).unwrap()));
        assert!(v.is_terminal(v.suited(Suit::Character, 6).unwrap()));
        assert_eq!(v.suited(Suit::Bamboo, 7), None);
    }

    #[test]
    pub fn honors() {
        let v = Variant::Four;
        let east = v.honor_from_letter('E').unwrap();
        assert!(v.is_wind(east) && v.is_value_honor(east));
        assert!(!v.is_value_honor(v.honor_from_letter('S').unwrap()));
        assert!(v.is_dragon(v.honor_from_letter('P').unwrap()));
        assert_eq!(Variant::Three.honor_from_letter('E'), None);
        assert!(!Variant::Three.is_value_honor(Variant::Three.honor_from_letter('F').unwrap()));
    }

    #[test]
    pub fn record_bytes() {
        let v = Variant::Four;
        assert_eq!(v.tile_from_byte(b'A'), v.honor(0));
        assert_eq!(v.tile_from_byte(b'b'), v.suited(Suit::Dot, 9));
        assert_eq!(v.tile_from_byte(b'c'), None);
        assert_eq!(v.tile_from_byte(b'@'), None);
        assert_eq!(Variant::Three.tile_from_byte(b'U'), Variant::Three.suited(Suit::Dot, 6));
        assert_eq!(Variant::Three.tile_from_byte(b'V'), None);
    }
}
