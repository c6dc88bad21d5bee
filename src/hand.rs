use crate::clock::Clock;
use crate::error::Result;
use crate::tile::Tile;
use crate::tiles::Tiles;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Who makes the decisions for a hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    /// A person at this console or window
    Local,
    /// The built-in policy, which passes with the given probability
    Automatic { skip_probability: f64 },
    /// A networked peer
    Remote { address: IpAddr },
}

/// Options a hand is created from at game setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandOpt {
    pub name: String,
    pub player: PlayerKind,
}

impl HandOpt {
    pub fn local(name: impl Into<String>) -> Self {
        HandOpt {
            name: name.into(),
            player: PlayerKind::Local,
        }
    }

    pub fn automatic(name: impl Into<String>, skip_probability: f64) -> Self {
        HandOpt {
            name: name.into(),
            player: PlayerKind::Automatic { skip_probability },
        }
    }

    pub fn remote(name: impl Into<String>, address: IpAddr) -> Self {
        HandOpt {
            name: name.into(),
            player: PlayerKind::Remote { address },
        }
    }
}

/// One participant: rack, score, clock and status flags.
#[derive(Debug, Clone)]
pub struct Hand {
    name: String,
    player: PlayerKind,
    tiles: Tiles,
    score: u32,
    clock: Clock,
    resigned: bool,
    gone_out: bool,
}

impl Hand {
    pub fn new(opt: HandOpt) -> Self {
        Hand {
            name: opt.name,
            player: opt.player,
            tiles: Tiles::new(),
            score: 0,
            clock: Clock::new(),
            resigned: false,
            gone_out: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rack
    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn count_tiles(&self) -> usize {
        self.tiles.count()
    }

    pub fn longest_run(&self) -> Tiles {
        self.tiles.longest_run()
    }

    // Score

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    /// Scores stop at zero.
    pub fn subtract_score(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }

    // Clock

    pub fn start_clock(&mut self) {
        self.clock.start();
    }

    /// Returns the milliseconds of the turn that just ended
    pub fn stop_clock(&mut self) -> u64 {
        self.clock.stop()
    }

    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn milliseconds(&self) -> u64 {
        self.clock.milliseconds()
    }

    pub fn seconds(&self) -> u64 {
        self.clock.seconds()
    }

    // Rack

    /// Refill from the stock bag, returning the tiles actually drawn.
    pub fn draw_tiles<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        bag: &mut Tiles,
        rng: &mut R,
    ) -> Result<Tiles> {
        let mut drawn = Tiles::new();
        drawn.draw_tiles(count, bag, rng);
        if let Err(e) = self.tiles.add_tiles(&drawn) {
            bag.add_tiles(&drawn)?;
            return Err(e);
        }
        Ok(drawn)
    }

    pub fn add_tiles(&mut self, tiles: &Tiles) -> Result<()> {
        self.tiles.add_tiles(tiles)
    }

    pub fn remove_tile(&mut self, tile: &Tile) -> Result<()> {
        self.tiles.remove_tile(tile)
    }

    pub fn remove_tiles(&mut self, tiles: &Tiles) -> Result<()> {
        self.tiles.remove_tiles(tiles)
    }

    // Status

    /// Give up: the whole rack goes back into the bag.
    pub fn resign(&mut self, bag: &mut Tiles) -> Result<()> {
        bag.add_tiles(&self.tiles)?;
        self.tiles = Tiles::new();
        self.resigned = true;
        Ok(())
    }

    /// Rejoin with `rack`, which is taken back out of the bag.
    ///
    /// Panics unless the hand has resigned.
    pub fn unresign(&mut self, bag: &mut Tiles, rack: &Tiles) -> Result<()> {
        assert!(self.resigned, "hand {} has not resigned", self.name);
        bag.remove_tiles(rack)?;
        self.tiles = rack.clone();
        self.resigned = false;
        Ok(())
    }

    pub fn has_resigned(&self) -> bool {
        self.resigned
    }

    pub fn go_out(&mut self) {
        self.gone_out = true;
    }

    pub fn has_gone_out(&self) -> bool {
        self.gone_out
    }

    // Player binding

    pub fn player(&self) -> &PlayerKind {
        &self.player
    }

    pub fn is_local(&self) -> bool {
        matches!(self.player, PlayerKind::Local)
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self.player, PlayerKind::Automatic { .. })
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.player, PlayerKind::Remote { .. })
    }

    pub fn skip_probability(&self) -> f64 {
        match self.player {
            PlayerKind::Automatic { skip_probability } => skip_probability,
            _ => 0.0,
        }
    }

    pub fn ip_address(&self) -> Option<IpAddr> {
        match self.player {
            PlayerKind::Remote { address } => Some(address),
            _ => None,
        }
    }
}

impl From<&Hand> for Tiles {
    fn from(hand: &Hand) -> Tiles {
        hand.tiles.clone()
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<12}{:>5}  {}", self.name, self.score, self.tiles)?;
        if self.resigned {
            write!(f, "  (resigned)")?;
        } else if self.gone_out {
            write!(f, "  (went out)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::thread::sleep;
    use std::time::Duration;

    fn bag() -> Tiles {
        (0..10).map(|id| Tile::new(id, vec![(id % 3) as u8, (id % 5) as u8])).collect()
    }

    #[test]
    fn test_draw_and_remove() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut bag = bag();
        let mut hand = Hand::new(HandOpt::local("Ann"));

        let drawn = hand.draw_tiles(4, &mut bag, &mut rng).unwrap();
        assert_eq!(drawn.count(), 4);
        assert_eq!(hand.tiles(), &drawn);
        assert_eq!(bag.count(), 6);

        let first = drawn.iter().next().unwrap().clone();
        hand.remove_tile(&first).unwrap();
        assert_eq!(hand.count_tiles(), 3);
        assert!(hand.remove_tile(&first).is_err());
    }

    #[test]
    fn test_score_never_negative() {
        let mut hand = Hand::new(HandOpt::local("Ann"));
        hand.add_score(7);
        hand.subtract_score(3);
        assert_eq!(hand.score(), 4);
        hand.subtract_score(10);
        assert_eq!(hand.score(), 0);
    }

    #[test]
    fn test_resign_and_unresign() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut bag = bag();
        let mut hand = Hand::new(HandOpt::local("Bo"));
        let rack = hand.draw_tiles(3, &mut bag, &mut rng).unwrap();

        hand.resign(&mut bag).unwrap();
        assert!(hand.has_resigned());
        assert_eq!(hand.count_tiles(), 0);
        assert_eq!(bag.count(), 10);

        hand.unresign(&mut bag, &rack).unwrap();
        assert!(!hand.has_resigned());
        assert_eq!(hand.tiles(), &rack);
        assert_eq!(bag.count(), 7);
    }

    #[test]
    #[should_panic(expected = "has not resigned")]
    fn test_unresign_requires_resignation() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut bag = bag();
        let mut hand = Hand::new(HandOpt::local("Cy"));
        hand.draw_tiles(2, &mut bag, &mut rng).unwrap();
        let other: Tiles = bag.iter().take(1).cloned().collect();
        let _ = hand.unresign(&mut bag, &other);
    }

    #[test]
    fn test_clock_accumulates() {
        let mut hand = Hand::new(HandOpt::automatic("Cy", 0.0));
        hand.start_clock();
        sleep(Duration::from_millis(15));
        let first = hand.stop_clock();
        hand.start_clock();
        sleep(Duration::from_millis(15));
        let second = hand.stop_clock();
        assert!(first >= 15 && second >= 15);
        assert_eq!(hand.milliseconds(), first + second);
        assert_eq!(hand.seconds(), (first + second) / 1000);
    }

    #[test]
    fn test_player_binding() {
        let local = Hand::new(HandOpt::local("a"));
        let auto = Hand::new(HandOpt::automatic("b", 0.25));
        let remote = Hand::new(HandOpt::remote("c", "10.0.0.2".parse().unwrap()));

        assert!(local.is_local() && !local.is_automatic() && !local.is_remote());
        assert!(auto.is_automatic());
        assert_eq!(auto.skip_probability(), 0.25);
        assert!(remote.is_remote());
        assert_eq!(remote.ip_address(), Some("10.0.0.2".parse().unwrap()));
        assert_eq!(local.ip_address(), None);
    }
}
