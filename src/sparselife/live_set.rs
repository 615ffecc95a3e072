//! The set of live cells, keyed by the pairing codec.

use rustc_hash::{FxBuildHasher, FxHashSet};

use super::codec::{self, CellKey, CodecError};

/// Live cells of one generation. Presence means alive; iteration order is
/// unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LiveSet {
    keys: FxHashSet<CellKey>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            keys: FxHashSet::with_capacity_and_hasher(cap, FxBuildHasher),
        }
    }

    /// Build a set from coordinates, failing on the first unaddressable one.
    pub fn from_coords<I>(cells: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let cells = cells.into_iter();
        let mut set = Self::with_capacity(cells.size_hint().0);
        for (x, y) in cells {
            set.insert(codec::encode(x, y)?);
        }
        Ok(set)
    }

    /// Returns `true` if the key was not already present.
    #[inline]
    pub fn insert(&mut self, key: CellKey) -> bool {
        self.keys.insert(key)
    }

    pub fn insert_coord(&mut self, x: i64, y: i64) -> Result<bool, CodecError> {
        Ok(self.insert(codec::encode(x, y)?))
    }

    #[inline]
    pub fn remove(&mut self, key: CellKey) -> bool {
        self.keys.remove(&key)
    }

    #[inline]
    pub fn contains(&self, key: CellKey) -> bool {
        self.keys.contains(&key)
    }

    /// Unaddressable coordinates are never alive.
    pub fn contains_coord(&self, x: i64, y: i64) -> bool {
        codec::encode(x, y).is_ok_and(|key| self.contains(key))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.keys.iter().copied()
    }

    /// Decoded coordinates of every live cell.
    pub fn coords(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.iter().map(codec::decode)
    }

    /// `(min_x, min_y, max_x, max_y)` of the live cells, or `None` if empty.
    pub fn bounds(&self) -> Option<(i64, i64, i64, i64)> {
        self.coords().fold(None, |acc, (x, y)| match acc {
            None => Some((x, y, x, y)),
            Some((min_x, min_y, max_x, max_y)) => {
                Some((min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y)))
            }
        })
    }
}

impl FromIterator<CellKey> for LiveSet {
    fn from_iter<I: IntoIterator<Item = CellKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<CellKey> for LiveSet {
    fn extend<I: IntoIterator<Item = CellKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LiveSet {
    type Item = CellKey;
    type IntoIter = std::iter::Copied<std::collections::hash_set::Iter<'a, CellKey>>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter().copied()
    }
}
