//! Index paths and index sets for addressing rows and sections.
//!
//! The `IndexPath` type is the fundamental way to reference a row within a
//! sectioned list. It contains the section and the row inside that section.
//! `IndexSet` is an ordered collection of unique positions, used wherever a
//! batch of rows or sections is addressed at once.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

/// Identifies one row within a two-level (section, row) list.
///
/// Index paths are plain coordinates: they carry no reference to the list
/// they came from. After insertions or removals, previously obtained paths
/// may point at different rows or at nothing at all.
///
/// # Ordering
///
/// Index paths sort by section first, then by row, which is the order a
/// list displays them in.
///
/// # Example
///
/// ```
/// use lattice_table_core::IndexPath;
///
/// let path = IndexPath::new(1, 4);
/// assert_eq!(path.section(), 1);
/// assert_eq!(path.row(), 4);
/// assert!(IndexPath::new(0, 9) < path);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IndexPath {
    section: usize,
    row: usize,
}

impl IndexPath {
    /// Creates an index path for `row` inside `section`.
    #[inline]
    pub const fn new(section: usize, row: usize) -> Self {
        Self { section, row }
    }

    /// Returns the section component.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the row component.
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns a path to another row in the same section.
    #[inline]
    pub const fn sibling(&self, row: usize) -> Self {
        Self::new(self.section, row)
    }
}

impl fmt::Debug for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexPath({}, {})", self.section, self.row)
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.row)
    }
}

impl From<(usize, usize)> for IndexPath {
    fn from((section, row): (usize, usize)) -> Self {
        Self::new(section, row)
    }
}

/// An ordered set of unique positions.
///
/// Iteration is always ascending, regardless of the order positions were
/// added in. Splice operations rely on this to pair positions with elements.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct IndexSet {
    indices: BTreeSet<usize>,
}

impl IndexSet {
    /// Creates an empty index set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing every position in `range`.
    ///
    /// An empty range produces an empty set.
    pub fn range(range: Range<usize>) -> Self {
        range.collect()
    }

    /// Returns the number of positions in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if the set holds no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the lowest position, if any.
    pub fn first(&self) -> Option<usize> {
        self.indices.first().copied()
    }

    /// Returns the highest position, if any.
    pub fn last(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    /// Returns `true` if `index` is in the set.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Adds a position. Returns `false` if it was already present.
    pub fn insert(&mut self, index: usize) -> bool {
        self.indices.insert(index)
    }

    /// Iterates positions in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + ExactSizeIterator + '_ {
        self.indices.iter().copied()
    }

    /// Iterates positions in descending order.
    pub fn iter_rev(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().rev().copied()
    }

    /// Maps every position to an index path inside `section`.
    pub fn to_index_paths(&self, section: usize) -> Vec<IndexPath> {
        self.iter().map(|row| IndexPath::new(section, row)).collect()
    }
}

impl fmt::Debug for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.indices.iter()).finish()
    }
}

impl FromIterator<usize> for IndexSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl Extend<usize> for IndexSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.indices.extend(iter);
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}
