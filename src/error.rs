//! Error types shared across the crate.

use crate::tile::TileId;
use derive_more::{Display, Error};

/// Errors raised by the tile ledger, the game driver and their parsers.
///
/// Rule violations in a proposed move are reported as [`crate::IllegalMove`]
/// by the predicates on [`crate::Game`]; they only become an `Error` when a
/// caller tries to commit the move anyway.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum Error {
    /// A tile with this identity is already in the collection.
    #[display("tile {id} is already present")]
    DuplicateTile { id: TileId },

    /// The collection holds no tile with this identity.
    #[display("tile {id} is not present")]
    MissingTile { id: TileId },

    /// Malformed tile, cell, move or turns text.
    #[display("cannot parse {what} from '{text}': {reason}")]
    Parse {
        what: &'static str,
        text: String,
        reason: String,
    },

    /// The active hand tried to commit a move the rules reject.
    #[display("illegal move: {reason}")]
    IllegalMove { reason: String },

    /// The game has already ended.
    #[display("the game is over")]
    GameOver,

    /// Invalid or unreadable configuration.
    #[display("config error: {message}")]
    Config { message: String },
}

impl Error {
    /// Builds a parse error for the given kind of token.
    pub fn parse(what: &'static str, text: &str, reason: impl Into<String>) -> Self {
        Error::Parse {
            what,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
