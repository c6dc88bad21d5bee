//! Gold Tile: a tile-laying game on an unbounded grid.
//!
//! Tiles carry several attributes; a line of tiles on the board must agree
//! on exactly one attribute and differ on the rest. The crate holds the
//! game's ledger (tiles, hands, moves and the turn log) and a driver,
//! [`Game`], that deals, checks and applies moves. Front-ends only compose
//! [`Move`]s and display state.

pub mod board;
pub mod cell;
pub mod clock;
pub mod config;
pub mod error;
pub mod game;
pub mod hand;
pub mod hands;
pub mod moves;
pub mod remote;
pub mod rules;
pub mod tile;
pub mod tile_cell;
pub mod tiles;
pub mod turns;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use board::Board;
pub use cell::{Axis, Cell};
pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{Game, TurnReport};
pub use hand::{Hand, HandOpt, PlayerKind};
pub use hands::Hands;
pub use moves::Move;
pub use rules::IllegalMove;
pub use tile::{AttrIndex, Tile, TileId};
pub use tile_cell::TileCell;
pub use tiles::Tiles;
pub use turns::Turns;
