use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::tile::Tile;
use crate::tile_cell::TileCell;
use crate::tiles::Tiles;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Keyword that prefixes the entry list of a resignation.
pub const RESIGN: &str = "resign";

/// One hand's turn: play tiles, pass, swap, or resign.
///
/// The kind is never stored. It follows from the resign flag and the shape
/// of the entry set:
/// - pass: no entries, not resigned
/// - play: at least one cell-bound entry
/// - pure swap: only swap-marked entries
/// - resign: flag set, entries are the hand's whole rack marked for swap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Move {
    entries: BTreeSet<TileCell>,
    resigned: bool,
}

impl Move {
    pub fn pass() -> Self {
        Move::default()
    }

    /// A resignation handing back every tile of `rack`
    pub fn resign(rack: &Tiles) -> Self {
        let mut m = Move::default();
        m.make_resign(rack);
        m
    }

    /// Insert an entry. Entries equal under the `TileCell` order collapse;
    /// use [`Move::repeats_tile`] and [`Move::repeats_cell`] to catch the
    /// other kinds of repetition.
    pub fn add(&mut self, entry: TileCell) {
        self.entries.insert(entry);
    }

    pub fn add_cell(&mut self, tile: Tile, cell: Cell) {
        self.add(TileCell::new(tile, cell));
    }

    pub fn add_swap_tile(&mut self, tile: Tile) {
        self.add(TileCell::swap(tile));
    }

    /// Discard any entries and turn this into a resignation of `rack`
    pub fn make_resign(&mut self, rack: &Tiles) {
        self.entries = rack.iter().cloned().map(TileCell::swap).collect();
        self.resigned = true;
    }

    pub fn is_pass(&self) -> bool {
        !self.resigned && self.entries.is_empty()
    }

    pub fn is_play(&self) -> bool {
        !self.resigned && self.entries.iter().any(|e| !e.is_swap())
    }

    pub fn is_pure_swap(&self) -> bool {
        !self.resigned && !self.entries.is_empty() && self.entries.iter().all(TileCell::is_swap)
    }

    pub fn is_resign(&self) -> bool {
        self.resigned
    }

    pub fn involves_swap(&self) -> bool {
        !self.resigned && self.entries.iter().any(TileCell::is_swap)
    }

    /// Some physical tile appears in more than one entry
    pub fn repeats_tile(&self) -> bool {
        let mut seen = HashSet::new();
        self.entries.iter().any(|e| !seen.insert(e.tile().id()))
    }

    /// Two entries target the same board cell
    pub fn repeats_cell(&self) -> bool {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter_map(TileCell::try_cell)
            .any(|cell| !seen.insert(cell))
    }

    /// Entries in canonical order
    pub fn entries(&self) -> impl Iterator<Item = &TileCell> {
        self.entries.iter()
    }

    pub fn count_tiles(&self) -> usize {
        self.entries.len()
    }

    pub fn count_swap(&self) -> usize {
        self.entries.iter().filter(|e| e.is_swap()).count()
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.entries.iter().filter_map(TileCell::try_cell).collect()
    }

    /// Every tile mentioned by the move
    pub fn tiles(&self) -> Tiles {
        self.entries.iter().map(|e| e.tile().clone()).collect()
    }

    pub fn played_tiles(&self) -> Tiles {
        self.entries
            .iter()
            .filter(|e| !e.is_swap())
            .map(|e| e.tile().clone())
            .collect()
    }

    pub fn swapped_tiles(&self) -> Tiles {
        self.entries
            .iter()
            .filter(|e| e.is_swap())
            .map(|e| e.tile().clone())
            .collect()
    }

    /// Parse the canonical text form.
    ///
    /// A `remote` move came from a peer that serialized it with `Display`, so
    /// its entries must already be in canonical order without repeats. Local
    /// text may list entries in any order; duplicates collapse.
    pub fn parse(s: &str, remote: bool) -> Result<Self> {
        let text = s.trim();
        let (resigned, body) = match text.strip_prefix(RESIGN) {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let inner = body
            .strip_prefix('{')
            .and_then(|b| b.strip_suffix('}'))
            .ok_or_else(|| Error::parse("move", s, "expected '{...}'"))?;

        let mut entries = BTreeSet::new();
        let mut previous: Option<TileCell> = None;
        for token in inner.split_whitespace() {
            let entry: TileCell = token.parse()?;
            if resigned && !entry.is_swap() {
                return Err(Error::parse("move", s, "a resignation cannot place tiles"));
            }
            if remote && previous.as_ref().is_some_and(|p| *p >= entry) {
                return Err(Error::parse("move", s, "entries are not in canonical order"));
            }
            previous = Some(entry.clone());
            entries.insert(entry);
        }
        Ok(Move { entries, resigned })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resigned {
            write!(f, "{}", RESIGN)?;
        }
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", entry)?;
        }
        write!(f, "}}")
    }
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Move::parse(s, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: u32, a: u8, b: u8) -> Tile {
        Tile::new(id, vec![a, b])
    }

    fn play() -> Move {
        let mut m = Move::pass();
        m.add_cell(tile(3, 1, 2), Cell::new(0, 1));
        m.add_cell(tile(1, 1, 0), Cell::new(0, 0));
        m
    }

    #[test]
    fn test_move_kinds() {
        let pass = Move::pass();
        assert!(pass.is_pass() && !pass.is_play() && !pass.is_pure_swap() && !pass.is_resign());

        let play = play();
        assert!(play.is_play() && !play.is_pass() && !play.involves_swap());

        let mut swap = Move::pass();
        swap.add_swap_tile(tile(4, 0, 0));
        assert!(swap.is_pure_swap() && swap.involves_swap() && !swap.is_play());

        let rack: Tiles = vec![tile(1, 0, 0), tile(2, 1, 1)].into_iter().collect();
        let resign = Move::resign(&rack);
        assert!(resign.is_resign() && !resign.is_pure_swap() && !resign.is_pass());
        assert_eq!(resign.tiles(), rack);
    }

    #[test]
    fn test_make_resign_clears_entries() {
        let mut m = play();
        let rack: Tiles = vec![tile(9, 2, 2)].into_iter().collect();
        m.make_resign(&rack);
        assert_eq!(m.count_tiles(), 1);
        assert_eq!(m.count_swap(), 1);
        assert!(m.cells().is_empty());
    }

    #[test]
    fn test_duplicate_entry_is_noop() {
        let mut m = play();
        m.add_cell(tile(1, 1, 0), Cell::new(0, 0));
        assert_eq!(m.count_tiles(), 2);
    }

    #[test]
    fn test_repeats() {
        let mut m = play();
        assert!(!m.repeats_tile() && !m.repeats_cell());

        m.add_cell(tile(1, 1, 0), Cell::new(5, 5));
        assert!(m.repeats_tile());
        assert!(!m.repeats_cell());

        let mut m = play();
        m.add_cell(tile(7, 1, 4), Cell::new(0, 0));
        assert!(m.repeats_cell());
        assert!(!m.repeats_tile());
    }

    #[test]
    fn test_move_to_string() {
        assert_eq!(Move::pass().to_string(), "{}");
        assert_eq!(play().to_string(), "{1:10@0,0 3:12@0,1}");
        let rack: Tiles = vec![tile(2, 1, 1)].into_iter().collect();
        assert_eq!(Move::resign(&rack).to_string(), "resign{2:11@swap}");
    }

    #[test]
    fn test_move_roundtrip() {
        let mut swap = Move::pass();
        swap.add_swap_tile(tile(4, 0, 0));
        swap.add_swap_tile(tile(2, 3, 0));
        let mut mixed = play();
        mixed.add_swap_tile(tile(6, 5, 5));
        let rack: Tiles = vec![tile(1, 0, 0), tile(2, 1, 1)].into_iter().collect();

        for m in [Move::pass(), play(), swap, mixed, Move::resign(&rack)] {
            let text = m.to_string();
            assert_eq!(Move::parse(&text, true).unwrap(), m);
            assert_eq!(text.parse::<Move>().unwrap(), m);
        }
    }

    #[test]
    fn test_parse_remote_requires_canonical_order() {
        let text = "{3:12@0,1 1:10@0,0}";
        assert_eq!(Move::parse(text, false).unwrap(), play());
        assert!(Move::parse(text, true).is_err());
        assert!(Move::parse("{1:10@0,0 1:10@0,0}", true).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("".parse::<Move>().is_err());
        assert!("1:10@0,0".parse::<Move>().is_err());
        assert!("{1:10}".parse::<Move>().is_err());
        assert!("resign{1:10@0,0}".parse::<Move>().is_err());
        assert!("resign".parse::<Move>().is_err());
    }
}
