//! Reasons a proposed move breaks the rules.

use crate::cell::Cell;
use crate::tile::TileId;
use derive_more::Display;

/// Why a move was rejected. Returned by the legality predicates so the
/// front-end can explain the problem before anything is committed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum IllegalMove {
    #[display("the same tile is used twice")]
    RepeatsTile,
    #[display("two tiles target the same cell")]
    RepeatsCell,
    #[display("tile {id} is not in your hand")]
    NotInRack { id: TileId },
    #[display("you cannot play and swap in the same turn")]
    PlayAndSwap,
    #[display("only {available} tiles are left to swap, not {wanted}")]
    SwapExceedsStock { wanted: usize, available: usize },
    #[display("a resignation must return your entire hand")]
    ResignMismatch,
    #[display("cell {cell} is too far from the start")]
    OutOfReach { cell: Cell },
    #[display("cell {cell} is already occupied")]
    CellOccupied { cell: Cell },
    #[display("tiles must be played in a single row or column")]
    NotInOneLine,
    #[display("tiles played in a line may not leave gaps")]
    Gap,
    #[display("the first play must cover the start cell {start}")]
    MissesStart { start: Cell },
    #[display("the play must touch a tile already on the board")]
    Disconnected,
    #[display("the line through {cell} mixes incompatible tiles")]
    IncompatibleLine { cell: Cell },
    #[display("the line through {cell} is longer than {max} tiles")]
    LineTooLong { cell: Cell, max: usize },
}
