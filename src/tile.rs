use crate::config::MAX_VALUES;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Identity of one physical tile.
pub type TileId = u32;
/// Value of a single attribute, below the configured value count.
pub type AttrIndex = u8;

/// A game piece: an immutable identity plus a fixed-length attribute vector.
///
/// Two tiles with the same attributes but different ids are clones. The
/// derived order compares attributes first and then the id, so clones sort
/// next to each other but remain distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tile {
    attrs: Vec<AttrIndex>,
    id: TileId,
}

impl Tile {
    /// Create a tile from its identity and attribute values
    pub fn new(id: TileId, attrs: Vec<AttrIndex>) -> Self {
        assert!(!attrs.is_empty(), "Tile needs at least one attribute");
        assert!(
            attrs.iter().all(|&v| v < MAX_VALUES),
            "Attribute values must be 0-{}",
            MAX_VALUES - 1
        );
        Tile { attrs, id }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn attrs(&self) -> &[AttrIndex] {
        &self.attrs
    }

    pub fn attribute(&self, index: usize) -> AttrIndex {
        self.attrs[index]
    }

    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }

    /// Same attribute vector, identity ignored
    pub fn has_same_attributes(&self, other: &Tile) -> bool {
        self.attrs == other.attrs
    }

    /// Same attribute vector but a different physical tile
    pub fn is_clone_of(&self, other: &Tile) -> bool {
        self.id != other.id && self.has_same_attributes(other)
    }

    /// The attribute on which the two tiles agree, if they agree on exactly one.
    pub fn common_attribute(&self, other: &Tile) -> Option<usize> {
        if self.attrs.len() != other.attrs.len() {
            return None;
        }
        let mut common = None;
        for (index, (a, b)) in self.attrs.iter().zip(&other.attrs).enumerate() {
            if a == b {
                if common.is_some() {
                    return None;
                }
                common = Some(index);
            }
        }
        common
    }

    /// Two tiles may share a line when they agree on exactly one attribute
    pub fn is_compatible_with(&self, other: &Tile) -> bool {
        self.common_attribute(other).is_some()
    }
}

/// Token form: "17:03" is tile 17 with attribute values 0 and 3
impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.id)?;
        for value in &self.attrs {
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}

impl FromStr for Tile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, attrs) = s
            .split_once(':')
            .ok_or_else(|| Error::parse("tile", s, "missing ':'"))?;
        let id: TileId = id
            .parse()
            .map_err(|_| Error::parse("tile", s, format!("invalid id '{}'", id)))?;
        if attrs.is_empty() {
            return Err(Error::parse("tile", s, "no attributes"));
        }
        let attrs = attrs
            .chars()
            .map(|c| match c.to_digit(10) {
                Some(v) if (v as u8) < MAX_VALUES => Ok(v as AttrIndex),
                _ => Err(Error::parse("tile", s, format!("invalid attribute '{}'", c))),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Tile { attrs, id })
    }
}
