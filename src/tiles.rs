use crate::config::GameConfig;
use crate::error::{Error, Result};
use crate::tile::{Tile, TileId};
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// A collection of tiles keyed by identity: a rack, the stock bag, or the
/// tiles of a move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiles(BTreeMap<TileId, Tile>);

impl Tiles {
    /// Create a new empty collection
    pub fn new() -> Self {
        Tiles(BTreeMap::new())
    }

    /// Build the full stock bag for a configuration: every attribute
    /// combination, `clones_per_combination` times, numbered from zero.
    pub fn full_set(config: &GameConfig) -> Self {
        let mut tiles = Tiles::new();
        let mut next_id: TileId = 0;
        for _ in 0..config.clones_per_combination {
            let mut attrs = vec![0u8; config.attribute_count];
            loop {
                tiles.0.insert(next_id, Tile::new(next_id, attrs.clone()));
                next_id += 1;
                if !next_combination(&mut attrs, config.values_per_attribute) {
                    break;
                }
            }
        }
        tiles
    }

    /// Add a tile, failing if its identity is already present
    pub fn add(&mut self, tile: Tile) -> Result<()> {
        if self.0.contains_key(&tile.id()) {
            return Err(Error::DuplicateTile { id: tile.id() });
        }
        self.0.insert(tile.id(), tile);
        Ok(())
    }

    /// Add every tile of `other`. Nothing is added if any identity collides.
    pub fn add_tiles(&mut self, other: &Tiles) -> Result<()> {
        if let Some(id) = other.ids().find(|id| self.0.contains_key(id)) {
            return Err(Error::DuplicateTile { id });
        }
        for tile in other.iter() {
            self.0.insert(tile.id(), tile.clone());
        }
        Ok(())
    }

    /// Remove a tile by value. The stored tile must match exactly.
    pub fn remove_tile(&mut self, tile: &Tile) -> Result<()> {
        match self.0.get(&tile.id()) {
            Some(stored) if stored == tile => {
                self.0.remove(&tile.id());
                Ok(())
            }
            _ => Err(Error::MissingTile { id: tile.id() }),
        }
    }

    pub fn remove_tile_id(&mut self, id: TileId) -> Result<Tile> {
        self.0.remove(&id).ok_or(Error::MissingTile { id })
    }

    /// Remove every tile of `other`. Nothing is removed if any is missing.
    pub fn remove_tiles(&mut self, other: &Tiles) -> Result<()> {
        if let Some(tile) = other.iter().find(|t| !self.contains(t)) {
            return Err(Error::MissingTile { id: tile.id() });
        }
        for id in other.ids() {
            self.0.remove(&id);
        }
        Ok(())
    }

    pub fn contains(&self, tile: &Tile) -> bool {
        self.0.get(&tile.id()) == Some(tile)
    }

    pub fn contains_id(&self, id: TileId) -> bool {
        self.0.contains_key(&id)
    }

    /// Check for another tile carrying the same attributes
    pub fn contains_clone(&self, tile: &Tile) -> bool {
        self.0.values().any(|t| t.is_clone_of(tile))
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.0.get(&id)
    }

    /// Remove and return one tile chosen uniformly at random
    pub fn draw_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tile> {
        if self.0.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.0.len());
        let id = *self.0.keys().nth(index)?;
        self.0.remove(&id)
    }

    /// Move up to `count` random tiles from `bag` into this collection.
    /// Returns how many were actually moved; an exhausted bag is not an error.
    pub fn draw_tiles<R: Rng + ?Sized>(&mut self, count: usize, bag: &mut Tiles, rng: &mut R) -> usize {
        let mut drawn = 0;
        while drawn < count {
            let Some(tile) = bag.draw_random_tile(rng) else {
                break;
            };
            self.0.insert(tile.id(), tile);
            drawn += 1;
        }
        drawn
    }

    /// One representative (the lowest id) per distinct attribute vector
    pub fn unique_tiles(&self) -> Tiles {
        let mut seen: BTreeMap<&[u8], &Tile> = BTreeMap::new();
        for tile in self.0.values() {
            seen.entry(tile.attrs()).or_insert(tile);
        }
        seen.into_values().cloned().collect()
    }

    /// True if the tiles could form a single line on the board: no clones,
    /// and every pair agrees on the same single attribute.
    pub fn are_all_compatible(&self) -> bool {
        let tiles: Vec<&Tile> = self.0.values().collect();
        if tiles.len() < 2 {
            return true;
        }
        let Some(shared) = tiles[0].common_attribute(tiles[1]) else {
            return false;
        };
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                if a.common_attribute(b) != Some(shared) {
                    return false;
                }
            }
        }
        true
    }

    /// Check every tile against the attribute layout of a configuration
    pub fn is_valid(&self, config: &GameConfig) -> bool {
        self.0.values().all(|t| {
            t.attribute_count() == config.attribute_count
                && t.attrs().iter().all(|&v| v < config.values_per_attribute)
        })
    }

    /// Largest subset of the tiles that could be played as one line.
    ///
    /// Clones are collapsed first. Each attribute and value is tried in
    /// ascending order and the first largest line found wins.
    pub fn longest_run(&self) -> Tiles {
        let unique: Vec<Tile> = self.unique_tiles().0.into_values().collect();
        let mut best: Vec<&Tile> = unique.iter().take(1).collect();
        let attribute_count = unique.first().map_or(0, Tile::attribute_count);

        for attr in 0..attribute_count {
            let mut values: Vec<u8> = unique.iter().map(|t| t.attribute(attr)).collect();
            values.sort_unstable();
            values.dedup();
            for value in values {
                let candidates: Vec<&Tile> = unique
                    .iter()
                    .filter(|t| t.attribute(attr) == value)
                    .collect();
                if candidates.len() <= best.len() {
                    continue;
                }
                let mut current = Vec::new();
                let mut found = Vec::new();
                grow_line(&candidates, 0, attr, &mut current, &mut found);
                if found.len() > best.len() {
                    best = found;
                }
            }
        }
        best.into_iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tiles in canonical (id) order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.0.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.0.keys().copied()
    }
}

/// Backtracking search for the largest subset of `candidates` whose members
/// all agree only on `attr`. Candidates already share `attr`.
fn grow_line<'a>(
    candidates: &[&'a Tile],
    start: usize,
    attr: usize,
    current: &mut Vec<&'a Tile>,
    best: &mut Vec<&'a Tile>,
) {
    if current.len() > best.len() {
        *best = current.clone();
    }
    for i in start..candidates.len() {
        // Not enough candidates left to beat the best line
        if current.len() + (candidates.len() - i) <= best.len() {
            return;
        }
        let tile = candidates[i];
        if current.iter().all(|t| t.common_attribute(tile) == Some(attr)) {
            current.push(tile);
            grow_line(candidates, i + 1, attr, current, best);
            current.pop();
        }
    }
}

/// Advance an attribute vector like an odometer. Returns false after the last one.
fn next_combination(attrs: &mut [u8], values: u8) -> bool {
    for slot in attrs.iter_mut().rev() {
        *slot += 1;
        if *slot < values {
            return true;
        }
        *slot = 0;
    }
    false
}

impl FromIterator<Tile> for Tiles {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Tiles(iter.into_iter().map(|t| (t.id(), t)).collect())
    }
}

impl fmt::Display for Tiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, tile) in self.0.values().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", tile)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn tiles(specs: &[(TileId, [u8; 2])]) -> Tiles {
        specs.iter().map(|(id, a)| Tile::new(*id, a.to_vec())).collect()
    }

    #[test]
    fn test_add_then_remove_restores() {
        let mut rack = tiles(&[(1, [0, 0]), (2, [1, 1])]);
        let original = rack.clone();
        let tile = Tile::new(7, vec![2, 3]);

        rack.add(tile.clone()).unwrap();
        assert!(rack.contains(&tile));
        rack.remove_tile(&tile).unwrap();
        assert_eq!(rack, original);
    }

    #[test]
    fn test_add_duplicate_fails() {
        let mut rack = tiles(&[(1, [0, 0])]);
        let err = rack.add(Tile::new(1, vec![3, 3])).unwrap_err();
        assert_eq!(err, Error::DuplicateTile { id: 1 });
        assert_eq!(rack.count(), 1);

        // add_tiles is all-or-nothing
        let extra = tiles(&[(5, [1, 1]), (1, [0, 0])]);
        assert!(rack.add_tiles(&extra).is_err());
        assert!(!rack.contains_id(5));
    }

    #[test]
    fn test_remove_missing_fails() {
        let mut rack = tiles(&[(1, [0, 0]), (2, [1, 1])]);
        assert_eq!(rack.remove_tile_id(9), Err(Error::MissingTile { id: 9 }));
        // Same id but different attributes is not the same tile
        assert!(rack.remove_tile(&Tile::new(1, vec![4, 4])).is_err());

        let partly_missing = tiles(&[(1, [0, 0]), (3, [2, 2])]);
        assert!(rack.remove_tiles(&partly_missing).is_err());
        assert_eq!(rack.count(), 2);
    }

    #[test]
    fn test_contains_clone() {
        let rack = tiles(&[(1, [0, 0]), (2, [1, 1])]);
        assert!(rack.contains_clone(&Tile::new(8, vec![1, 1])));
        assert!(!rack.contains_clone(&Tile::new(2, vec![1, 1])));
        assert!(!rack.contains_clone(&Tile::new(8, vec![1, 2])));
    }

    #[test]
    fn test_draw_tiles_stops_when_bag_empty() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut bag = tiles(&[(1, [0, 0]), (2, [1, 1]), (3, [2, 2])]);
        let mut rack = Tiles::new();

        assert_eq!(rack.draw_tiles(2, &mut bag, &mut rng), 2);
        assert_eq!(bag.count(), 1);
        assert_eq!(rack.draw_tiles(5, &mut bag, &mut rng), 1);
        assert!(bag.is_empty());
        assert_eq!(rack.count(), 3);
        assert!(bag.draw_random_tile(&mut rng).is_none());
    }

    #[test]
    fn test_full_set() {
        let config = GameConfig {
            values_per_attribute: 3,
            clones_per_combination: 2,
            ..GameConfig::default()
        };
        let bag = Tiles::full_set(&config);
        assert_eq!(bag.count(), 18);
        assert_eq!(bag.unique_tiles().count(), 9);
        assert!(bag.is_valid(&config));
        assert!(!bag.is_valid(&GameConfig {
            values_per_attribute: 2,
            ..config
        }));
    }

    #[test]
    fn test_are_all_compatible() {
        assert!(Tiles::new().are_all_compatible());
        assert!(tiles(&[(1, [0, 0]), (2, [0, 1]), (3, [0, 2])]).are_all_compatible());
        // Shares colour with one tile and shape with another
        assert!(!tiles(&[(1, [0, 0]), (2, [0, 1]), (3, [1, 1])]).are_all_compatible());
        // Clones never fit in one line
        assert!(!tiles(&[(1, [0, 0]), (2, [0, 0])]).are_all_compatible());
    }

    #[test]
    fn test_longest_run() {
        let rack = tiles(&[
            (1, [0, 0]),
            (2, [1, 0]),
            (3, [2, 1]),
            (4, [2, 2]),
            (5, [2, 3]),
            (6, [2, 3]),
        ]);
        let run = rack.longest_run();
        assert_eq!(run.count(), 3);
        assert!(run.are_all_compatible());
        assert!(run.iter().all(|t| t.attribute(0) == 2));
        // The clone with the lower id represents its attributes
        assert!(run.contains_id(5));
    }

    #[test]
    fn test_longest_run_tie_goes_to_first_attribute() {
        let rack = tiles(&[(1, [0, 0]), (2, [0, 1]), (3, [1, 0])]);
        let run = rack.longest_run();
        assert_eq!(run.ids().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(Tiles::new().longest_run().count(), 0);
    }

    #[test]
    fn test_display() {
        let rack = tiles(&[(2, [1, 1]), (1, [0, 3])]);
        assert_eq!(rack.to_string(), "{1:03 2:11}");
    }
}
