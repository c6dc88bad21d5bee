//! Acquiring moves for hands played from another machine.
//!
//! The transport is left to the caller; this module fixes the contract: a
//! [`MoveSource`] blocks until the peer sends a move in the canonical text
//! form or the wait times out.

use crate::hand::Hand;
use crate::moves::Move;
use derive_more::{Display, Error};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

/// Failure to obtain a move from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RemoteError {
    #[display("no move from {hand} within {timeout_ms} ms")]
    Timeout { hand: String, timeout_ms: u64 },
    #[display("connection to {hand} was lost")]
    Disconnected { hand: String },
    #[display("{hand} sent an unreadable move '{text}'")]
    Parse { hand: String, text: String },
}

/// Anything that can deliver the next move for a remote hand.
pub trait MoveSource {
    fn receive_move(&mut self, hand: &Hand, timeout: Duration) -> Result<Move, RemoteError>;
}

/// How long to wait, and how many timeouts to tolerate, before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemotePolicy {
    pub timeout: Duration,
    pub retries: u32,
}

impl RemotePolicy {
    pub fn from_config(config: &crate::config::GameConfig) -> Self {
        RemotePolicy {
            timeout: Duration::from_millis(config.remote_timeout_ms),
            retries: config.remote_retries,
        }
    }
}

/// Wait for a remote hand's move, retrying timeouts up to `policy.retries`
/// times. Disconnects and garbled moves are returned at once.
pub fn fetch_remote_move<S: MoveSource + ?Sized>(
    source: &mut S,
    hand: &Hand,
    policy: &RemotePolicy,
) -> Result<Move, RemoteError> {
    let mut attempt = 0;
    loop {
        match source.receive_move(hand, policy.timeout) {
            Err(RemoteError::Timeout { .. }) if attempt < policy.retries => {
                attempt += 1;
                log::warn!(
                    "{:<32}{} (attempt {} of {})",
                    "remote move timed out",
                    hand.name(),
                    attempt,
                    policy.retries
                );
            }
            result => return result,
        }
    }
}

/// A [`MoveSource`] fed by a channel of serialized moves, e.g. from a
/// socket reader thread.
pub struct ChannelSource {
    receiver: Receiver<String>,
}

impl ChannelSource {
    pub fn new(receiver: Receiver<String>) -> Self {
        ChannelSource { receiver }
    }
}

impl MoveSource for ChannelSource {
    fn receive_move(&mut self, hand: &Hand, timeout: Duration) -> Result<Move, RemoteError> {
        let text = self.receiver.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => RemoteError::Timeout {
                hand: hand.name().to_string(),
                timeout_ms: timeout.as_millis() as u64,
            },
            RecvTimeoutError::Disconnected => RemoteError::Disconnected {
                hand: hand.name().to_string(),
            },
        })?;
        Move::parse(&text, true).map_err(|_| RemoteError::Parse {
            hand: hand.name().to_string(),
            text,
        })
    }
}
