use crate::error::{Error, Result};
use crate::moves::Move;
use std::fmt;
use std::str::FromStr;

const PREFIX: &str = "turns{";

/// The shared, append-only log of every move made in a game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turns(Vec<Move>);

impl Turns {
    pub fn new() -> Self {
        Turns(Vec::new())
    }

    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.0.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Move> {
        self.0.get(index)
    }

    pub fn last(&self) -> Option<&Move> {
        self.0.last()
    }

    /// Passes, swaps and resignations made since the most recent play.
    pub fn trailing_non_plays(&self) -> usize {
        self.0.iter().rev().take_while(|m| !m.is_play()).count()
    }

    /// The log length minus the non-play moves trailing the most recent
    /// play, i.e. the position just past that play. `len()` when the last
    /// move was a play, zero when nothing was ever played.
    pub fn index_last_play(&self) -> usize {
        self.len() - self.trailing_non_plays()
    }
}

impl fmt::Display for Turns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PREFIX)?;
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        write!(f, "}}")
    }
}

impl FromStr for Turns {
    type Err = Error;

    /// Moves contain spaces of their own, so the list is split on the
    /// spaces that sit outside any move's braces.
    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| Error::parse("turns", s, "expected 'turns{...}'"))?;

        let mut turns = Turns::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in inner.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| Error::parse("turns", s, "unbalanced '}'"))?;
                    if depth == 0 {
                        turns.push(Move::parse(&inner[start..=i], true)?);
                        start = i + 1;
                    }
                }
                c if c.is_whitespace() && depth == 0 => start = i + 1,
                _ => {}
            }
        }
        if depth != 0 || !inner[start..].trim().is_empty() {
            return Err(Error::parse("turns", s, "trailing text after last move"));
        }
        Ok(turns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::tile::Tile;
    use crate::tiles::Tiles;

    fn play() -> Move {
        let mut m = Move::pass();
        m.add_cell(Tile::new(1, vec![0, 1]), Cell::ORIGIN);
        m.add_cell(Tile::new(2, vec![0, 2]), Cell::new(0, 1));
        m
    }

    fn swap() -> Move {
        let mut m = Move::pass();
        m.add_swap_tile(Tile::new(3, vec![4, 4]));
        m
    }

    #[test]
    fn test_index_last_play_empty() {
        assert_eq!(Turns::new().index_last_play(), 0);
    }

    #[test]
    fn test_index_last_play() {
        let mut turns = Turns::new();
        for m in [swap(), Move::pass(), play(), Move::pass(), Move::pass()] {
            turns.push(m);
        }
        assert_eq!(turns.len(), 5);
        assert_eq!(turns.trailing_non_plays(), 2);
        assert_eq!(turns.index_last_play(), 3);

        turns.push(play());
        assert_eq!(turns.index_last_play(), turns.len());
    }

    #[test]
    fn test_index_last_play_without_plays() {
        let mut turns = Turns::new();
        turns.push(Move::pass());
        turns.push(swap());
        assert_eq!(turns.index_last_play(), 0);
    }

    #[test]
    fn test_turns_string_form() {
        let mut turns = Turns::new();
        assert_eq!(turns.to_string(), "turns{}");

        turns.push(play());
        turns.push(Move::pass());
        let rack: Tiles = vec![Tile::new(9, vec![5, 0])].into_iter().collect();
        turns.push(Move::resign(&rack));
        let text = turns.to_string();
        assert_eq!(text, "turns{{1:01@0,0 2:02@0,1} {} resign{9:50@swap}}");
        assert_eq!(text.parse::<Turns>().unwrap(), turns);
    }

    #[test]
    fn test_turns_parse_rejects_malformed() {
        assert!("{}".parse::<Turns>().is_err());
        assert!("turns{{}".parse::<Turns>().is_err());
        assert!("turns{{} junk}".parse::<Turns>().is_err());
        assert!("turns{{1:01@0,0}}}".parse::<Turns>().is_err());
    }
}
