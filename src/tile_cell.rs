use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::tile::Tile;
use std::fmt;
use std::str::FromStr;

/// Marker used in place of a cell for tiles the hand wants swapped.
pub const SWAP: &str = "swap";

/// One entry of a move: a tile bound either to a board cell or to the swap
/// marker.
///
/// Entries order by tile first. For the same tile the swap entry comes
/// before any cell-bound one (`None < Some`), and cell-bound entries then
/// order by cell. This makes the entry set of a move canonical regardless of
/// the order tiles were added.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCell {
    tile: Tile,
    cell: Option<Cell>,
}

impl TileCell {
    /// A tile placed on the board
    pub fn new(tile: Tile, cell: Cell) -> Self {
        TileCell {
            tile,
            cell: Some(cell),
        }
    }

    /// A tile to be returned to the stock bag
    pub fn swap(tile: Tile) -> Self {
        TileCell { tile, cell: None }
    }

    pub fn is_swap(&self) -> bool {
        self.cell.is_none()
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// The target cell.
    ///
    /// # Panics
    /// If the entry is swap-pending.
    pub fn cell(&self) -> Cell {
        match self.cell {
            Some(cell) => cell,
            None => panic!("tile {} is marked for swap and has no cell", self.tile),
        }
    }

    pub fn try_cell(&self) -> Option<Cell> {
        self.cell
    }
}

impl fmt::Display for TileCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cell {
            Some(cell) => write!(f, "{}@{}", self.tile, cell),
            None => write!(f, "{}@{}", self.tile, SWAP),
        }
    }
}

impl FromStr for TileCell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (tile, target) = s
            .split_once('@')
            .ok_or_else(|| Error::parse("tile cell", s, "missing '@'"))?;
        let tile: Tile = tile.parse()?;
        if target == SWAP {
            Ok(TileCell::swap(tile))
        } else {
            Ok(TileCell::new(tile, target.parse()?))
        }
    }
}
