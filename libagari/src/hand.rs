//! Canonical hands and the tile notation used by tests and the explain mode.
use crate::tile::{COPIES, MAX_TILE_KINDS, Suit, Tile, Variant};
use std::fmt;
use anyhow::{Result, bail, ensure};
use tinyvec::ArrayVec;

pub const MAX_HAND_LEN: usize = 14;

pub type Tiles = ArrayVec<[Tile; MAX_HAND_LEN]>;

/// A complete hand in canonical (non-decreasing) order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hand {
    variant: Variant,
    tiles: Tiles,
}

impl Hand {
    /// Sorts `tiles` and checks the hand size, the alphabet and the copy limit.
    pub fn new<I>(variant: Variant, tiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut buf = Tiles::new();
        for t in tiles {
            ensure!(buf.len() < variant.hand_len(), "more than {} tiles", variant.hand_len());
            ensure!(
                variant.tile(t.as_u8()).is_some(),
                "tile index {} is not in the {variant} alphabet",
                t.as_u8(),
            );
            buf.push(t);
        }
        ensure!(
            buf.len() == variant.hand_len(),
            "expected {} tiles, got {}",
            variant.hand_len(),
            buf.len(),
        );
        buf.sort_unstable();

        let hand = Self { variant, tiles: buf };
        let counts = hand.counts();
        if let Some(&t) = hand.tiles.iter().find(|t| counts[t.as_usize()] > COPIES) {
            bail!("{} copies of {}", counts[t.as_usize()], variant.tile_string(t));
        }
        Ok(hand)
    }

    /// Decodes one fixed-length enumerator record.
    pub fn from_record(variant: Variant, record: &[u8]) -> Result<Self> {
        ensure!(
            record.len() == variant.hand_len(),
            "record is {} bytes, expected {}",
            record.len(),
            variant.hand_len(),
        );
        let mut tiles = Tiles::new();
        for &b in record {
            let Some(t) = variant.tile_from_byte(b) else {
                bail!("byte {b:#04x} does not encode a {variant} tile");
            };
            tiles.push(t);
        }
        Self::new(variant, tiles)
    }

    pub fn to_record(&self) -> Vec<u8> {
        self.tiles.iter().map(|&t| self.variant.tile_to_byte(t)).collect()
    }

    #[inline]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn counts(&self) -> [u8; MAX_TILE_KINDS] {
        let mut counts = [0; MAX_TILE_KINDS];
        for t in &self.tiles {
            counts[t.as_usize()] += 1;
        }
        counts
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tiles_to_string(self.variant, &self.tiles))
    }
}

/// Groups consecutive tiles of a suit, e.g. `11m 234s CCC`.
pub fn tiles_to_string(variant: Variant, tiles: &[Tile]) -> String {
    let mut groups: Vec<String> = vec![];
    let mut cur_suit = None;
    for &t in tiles {
        let suit = variant.suit_of(t);
        let sym = match variant.rank_of(t) {
            Some(r) => char::from(b'0' + r).to_string(),
            None => variant.tile_string(t),
        };
        match (cur_suit, groups.last_mut()) {
            (Some(s), Some(g)) if s == suit => {
                if suit != Suit::Honor {
                    g.pop();
                }
                g.push_str(&sym);
            }
            _ => groups.push(sym),
        }
        if suit != Suit::Honor {
            if let Some(g) = groups.last_mut() {
                g.push(suit.letter());
            }
        }
        cur_suit = Some(suit);
    }
    groups.join(" ")
}

/// Reads tile notation: digits followed by `m` (Character), `p` (Dot), `s`
/// (Bamboo) or `z` (honors in alphabet order), and the honor letters
/// `E S W N P F C`. Whitespace is ignored.
pub fn parse_tiles(variant: Variant, s: &str) -> Result<Vec<Tile>> {
    ensure!(s.is_ascii(), "hand {s} contains non-ascii content");

    let mut tiles = vec![];
    let mut stack = vec![];

    for b in s.as_bytes() {
        match b {
            b'0'..=b'9' => stack.push(b - b'0'),
            b'm' | b'p' | b's' | b'z' => {
                for n in stack.drain(..) {
                    let tile = match b {
                        b'm' => variant.suited(Suit::Character, n),
                        b'p' => variant.suited(Suit::Dot, n),
                        b's' => variant.suited(Suit::Bamboo, n),
                        _ => n.checked_sub(1).and_then(|n| variant.honor(n)),
                    };
                    let Some(tile) = tile else {
                        bail!("{n}{} is not a {variant} tile", *b as char);
                    };
                    tiles.push(tile);
                }
            }
            _ if b.is_ascii_uppercase() => {
                ensure!(stack.is_empty(), "digits before honor {}", *b as char);
                let Some(tile) = variant.honor_from_letter(*b as char) else {
                    bail!("{} is not a {variant} honor", *b as char);
                };
                tiles.push(tile);
            }
            _ if b.is_ascii_whitespace() => (),
            _ => bail!("unexpected byte {b}"),
        };
    }
    ensure!(stack.is_empty(), "trailing digits without a suit in {s}");

    Ok(tiles)
}

/// Parses and validates a complete hand.
pub fn hand(variant: Variant, s: &str) -> Result<Hand> {
    Hand::new(variant, parse_tiles(variant, s)?)
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    pub fn notation_round_trip() {
        let h = hand(Variant::Four, "CC 234s 345m 567p 678s").unwrap();
        assert_eq!(h.tiles().len(), 14);
        assert_eq!(h.to_string(), "CC 234678s 345m 567p");
        assert_eq!(hand(Variant::Four, &h.to_string()).unwrap(), h);

        let h = hand(Variant::Three, "11z 123456s 666p").unwrap();
        assert_eq!(h.to_string(), "CC 123456s 666p");
    }

    #[test]
    pub fn canonical_order() {
        let a = hand(Variant::Four, "EEE 99s 123m 456m 789m").unwrap();
        let b = hand(Variant::Four, "789m 99s 456m EEE 123m").unwrap();
        assert_eq!(a, b);
        assert!(a.tiles().windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    pub fn rejects_bad_hands() {
        assert!(hand(Variant::Four, "111123456789999m").is_err()); // 15 tiles
        assert!(hand(Variant::Four, "11111m 234567899p").is_err()); // five copies
        assert!(hand(Variant::Three, "EE 123456s 123456m").is_err()); // no winds
        assert!(hand(Variant::Three, "11s 789s 123m 456m").is_err()); // no rank 7
        assert!(parse_tiles(Variant::Four, "123").is_err());
        assert!(parse_tiles(Variant::Four, "12x").is_err());
    }

    #[test]
    pub fn record_round_trip() {
        let v = Variant::Four;
        let h = hand(v, "CC EEE SSS WWW NNN").unwrap();
        let record = h.to_record();
        assert_eq!(record, b"AADDDEEEFFFGGG");
        assert_eq!(Hand::from_record(v, &record).unwrap(), h);

        assert!(Hand::from_record(v, b"AADDDEEEFFFGG").is_err());
        assert!(Hand::from_record(v, b"AADDDEEEFFFGG~").is_err());
    }
}
