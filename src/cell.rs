use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Direction of a line on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

/// A board coordinate. The grid is unbounded in every direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub column: i32,
}

impl Cell {
    /// Where the first play of a game must land.
    pub const ORIGIN: Cell = Cell { row: 0, column: 0 };

    /// Furthest a tile may be placed from the origin along either axis.
    pub const REACH: i32 = 1 << 24;

    pub fn new(row: i32, column: i32) -> Self {
        Cell { row, column }
    }

    /// Whether a tile may be placed here.
    pub fn is_within_reach(self) -> bool {
        let reach = Cell::REACH.unsigned_abs();
        self.row.unsigned_abs() <= reach && self.column.unsigned_abs() <= reach
    }

    /// The cell `offset` steps away along `axis`, if it can be addressed.
    pub fn checked_step(self, axis: Axis, offset: i32) -> Option<Cell> {
        match axis {
            Axis::Row => Some(Cell::new(self.row, self.column.checked_add(offset)?)),
            Axis::Column => Some(Cell::new(self.row.checked_add(offset)?, self.column)),
        }
    }

    /// The cell `offset` steps away along `axis`.
    ///
    /// Panics past the edge of the coordinate space; cells within
    /// [`Cell::REACH`] always have neighbors.
    pub fn step(self, axis: Axis, offset: i32) -> Cell {
        self.checked_step(axis, offset)
            .unwrap_or_else(|| panic!("no cell {} steps from {} along {:?}", offset, self, axis))
    }

    /// The cell on the same line as this one at `coordinate` along `axis`.
    pub fn with_coordinate(self, axis: Axis, coordinate: i32) -> Cell {
        match axis {
            Axis::Row => Cell::new(self.row, coordinate),
            Axis::Column => Cell::new(coordinate, self.column),
        }
    }

    pub fn neighbors(self) -> [Cell; 4] {
        [
            self.step(Axis::Row, -1),
            self.step(Axis::Row, 1),
            self.step(Axis::Column, -1),
            self.step(Axis::Column, 1),
        ]
    }

    /// Position of this cell along an axis.
    pub fn coordinate(self, axis: Axis) -> i32 {
        match axis {
            Axis::Row => self.column,
            Axis::Column => self.row,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.column)
    }
}

impl FromStr for Cell {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| Error::parse("cell", s, "missing ','"))?;
        let row = row
            .parse()
            .map_err(|_| Error::parse("cell", s, format!("invalid row '{}'", row)))?;
        let column = column
            .parse()
            .map_err(|_| Error::parse("cell", s, format!("invalid column '{}'", column)))?;
        Ok(Cell::new(row, column))
    }
}
