use crate::cell::{Axis, Cell};
use crate::moves::Move;
use crate::rules::IllegalMove;
use crate::tile::Tile;
use crate::tiles::Tiles;
use std::collections::BTreeMap;
use std::fmt;

/// The tiles laid so far, on an unbounded grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: BTreeMap<Cell, Tile>,
    max_line: usize,
}

impl Board {
    /// Create an empty board whose lines hold at most `max_line` tiles
    pub fn new(max_line: usize) -> Self {
        Board {
            cells: BTreeMap::new(),
            max_line,
        }
    }

    pub fn get(&self, cell: Cell) -> Option<&Tile> {
        self.cells.get(&cell)
    }

    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        !self.cells.contains_key(&cell)
    }

    pub fn has_neighbor(&self, cell: Cell) -> bool {
        cell.neighbors().iter().any(|n| self.cells.contains_key(n))
    }

    pub fn count(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &Tile)> {
        self.cells.iter()
    }

    /// Empty cells next to at least one tile, or the origin on an empty board
    pub fn frontier(&self) -> Vec<Cell> {
        if self.cells.is_empty() {
            return vec![Cell::ORIGIN];
        }
        let mut cells: Vec<Cell> = self
            .cells
            .keys()
            .flat_map(|c| c.neighbors())
            .filter(|c| self.is_empty_cell(*c))
            .collect();
        cells.sort();
        cells.dedup();
        cells
    }

    /// Lay every cell-bound tile of an already checked move
    pub fn place(&mut self, m: &Move) {
        for entry in m.entries().filter(|e| !e.is_swap()) {
            self.cells.insert(entry.cell(), entry.tile().clone());
        }
    }

    /// The contiguous run of tiles through `cell` along `axis`, counting
    /// `pending` placements as if they were on the board.
    pub fn line_through(
        &self,
        cell: Cell,
        axis: Axis,
        pending: &BTreeMap<Cell, Tile>,
    ) -> Vec<Tile> {
        let lookup = |c: Cell| pending.get(&c).or_else(|| self.cells.get(&c));
        let mut start = cell;
        while lookup(start.step(axis, -1)).is_some() {
            start = start.step(axis, -1);
        }
        let mut line = Vec::new();
        let mut at = start;
        while let Some(tile) = lookup(at) {
            line.push(tile.clone());
            at = at.step(axis, 1);
        }
        line
    }

    /// Check the placement rules for the cell-bound entries of `m`.
    pub fn check_play(&self, m: &Move) -> Result<(), IllegalMove> {
        let pending = pending_tiles(m);
        let Some(&first) = pending.keys().next() else {
            return Ok(());
        };
        if let Some(&cell) = pending.keys().find(|c| !c.is_within_reach()) {
            return Err(IllegalMove::OutOfReach { cell });
        }
        if let Some(&cell) = pending.keys().find(|c| !self.is_empty_cell(**c)) {
            return Err(IllegalMove::CellOccupied { cell });
        }

        let axis = play_axis(&pending)?;
        let coords: Vec<i32> = pending.keys().map(|c| c.coordinate(axis)).collect();
        let (low, high) = (coords[0], coords[coords.len() - 1]);
        for coordinate in low..=high {
            let cell = first.with_coordinate(axis, coordinate);
            if !pending.contains_key(&cell) && self.is_empty_cell(cell) {
                return Err(IllegalMove::Gap);
            }
        }

        if self.cells.is_empty() {
            if !pending.contains_key(&Cell::ORIGIN) {
                return Err(IllegalMove::MissesStart { start: Cell::ORIGIN });
            }
        } else if !pending.keys().any(|c| self.has_neighbor(*c)) {
            return Err(IllegalMove::Disconnected);
        }

        for (cell, line) in self.lines_formed(&pending, axis) {
            if line.len() > self.max_line {
                return Err(IllegalMove::LineTooLong {
                    cell,
                    max: self.max_line,
                });
            }
            let tiles: Tiles = line.into_iter().collect();
            if !tiles.are_all_compatible() {
                return Err(IllegalMove::IncompatibleLine { cell });
            }
        }
        Ok(())
    }

    /// Points for a play that already passed [`Board::check_play`].
    ///
    /// Each line of two or more tiles through a new tile scores its length,
    /// and a line of the maximum length scores it twice. A lone tile that
    /// forms no line scores one point.
    pub fn score_play(&self, m: &Move) -> u32 {
        let pending = pending_tiles(m);
        if pending.is_empty() {
            return 0;
        }
        let axis = play_axis(&pending).unwrap_or(Axis::Row);
        let mut points = 0;
        for (_, line) in self.lines_formed(&pending, axis) {
            let length = line.len() as u32;
            points += length;
            if line.len() == self.max_line {
                points += length;
            }
        }
        points.max(1)
    }

    /// The main line along `axis` plus each cross line, keeping only lines
    /// of at least two tiles. Each is tagged with a new cell it runs through.
    fn lines_formed(&self, pending: &BTreeMap<Cell, Tile>, axis: Axis) -> Vec<(Cell, Vec<Tile>)> {
        let mut lines = Vec::new();
        if let Some(&first) = pending.keys().next() {
            lines.push((first, self.line_through(first, axis, pending)));
        }
        for &cell in pending.keys() {
            lines.push((cell, self.line_through(cell, axis.other(), pending)));
        }
        lines.retain(|(_, line)| line.len() >= 2);
        lines
    }
}

fn pending_tiles(m: &Move) -> BTreeMap<Cell, Tile> {
    m.entries()
        .filter(|e| !e.is_swap())
        .map(|e| (e.cell(), e.tile().clone()))
        .collect()
}

/// The axis all pending cells share. A single tile counts as a row.
fn play_axis(pending: &BTreeMap<Cell, Tile>) -> Result<Axis, IllegalMove> {
    let mut cells = pending.keys();
    let Some(first) = cells.next() else {
        return Ok(Axis::Row);
    };
    let rest: Vec<&Cell> = cells.collect();
    if rest.iter().all(|c| c.row == first.row) {
        Ok(Axis::Row)
    } else if rest.iter().all(|c| c.column == first.column) {
        Ok(Axis::Column)
    } else {
        Err(IllegalMove::NotInOneLine)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cells.is_empty() {
            return writeln!(f, "(empty board)");
        }
        let rows = self.cells.keys().map(|c| c.row);
        let columns = self.cells.keys().map(|c| c.column);
        let (top, bottom) = (rows.clone().min().unwrap_or(0), rows.max().unwrap_or(0));
        let (left, right) = (columns.clone().min().unwrap_or(0), columns.max().unwrap_or(0));
        for row in top..=bottom {
            write!(f, "{:>4} ", row)?;
            for column in left..=right {
                match self.cells.get(&Cell::new(row, column)) {
                    Some(tile) => {
                        let attrs: String = tile.attrs().iter().map(|v| v.to_string()).collect();
                        write!(f, " {:>3}", attrs)?;
                    }
                    None => write!(f, " {:>3}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
