//! Pattern extraction (§4.1) and catalog building (§4.2).

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::WfcError;
use crate::grid::Grid;

/// An N×N window of tile atoms, identified by content.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Pattern<T> {
    size: usize,
    cells: Vec<T>,
}

impl<T: Clone> Pattern<T> {
    pub fn new(size: usize, cells: Vec<T>) -> Self {
        assert_eq!(cells.len(), size * size);
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> &T {
        &self.cells[y * self.size + x]
    }

    /// The tile at `(floor(N/2), floor(N/2))`, the canonical representative
    /// used by rendering (§4.6) and the center-tile adjacency filter (§4.3).
    pub fn center(&self) -> &T {
        let c = self.size / 2;
        self.get(c, c)
    }

    fn row(&self, y: usize) -> impl Iterator<Item = &T> {
        (0..self.size).map(move |x| self.get(x, y))
    }

    fn col(&self, x: usize) -> impl Iterator<Item = &T> {
        (0..self.size).map(move |y| self.get(x, y))
    }
}

impl<T: PartialEq> Pattern<T> {
    /// Border-overlap check for §4.3 condition 1: does `self`'s d-facing
    /// edge equal `other`'s opposite-facing edge?
    pub(crate) fn borders_agree(&self, other: &Pattern<T>, dir: crate::direction::Direction) -> bool
    where
        T: Clone,
    {
        use crate::direction::Direction;
        let n = self.size;
        match dir {
            Direction::Up => (0..n).all(|i| self.get(i, 0) == other.get(i, n - 1)),
            Direction::Right => (0..n).all(|i| self.get(n - 1, i) == other.get(0, i)),
            Direction::Down => (0..n).all(|i| self.get(i, n - 1) == other.get(i, 0)),
            Direction::Left => (0..n).all(|i| self.get(0, i) == other.get(n - 1, i)),
        }
    }
}

/// Slide an N×N window across `grid` and emit every occurrence (§4.1).
///
/// Duplicates are preserved: this is a multiset, not a set. A grid smaller
/// than `n` in either dimension contributes no patterns.
fn extract_patterns<T: Clone>(grid: &Grid<T>, n: usize) -> Vec<Pattern<T>> {
    if grid.width < n || grid.height < n {
        return Vec::new();
    }
    let mut patterns = Vec::with_capacity((grid.width - n + 1) * (grid.height - n + 1));
    for y in 0..=(grid.height - n) {
        for x in 0..=(grid.width - n) {
            let mut cells = Vec::with_capacity(n * n);
            for dy in 0..n {
                for dx in 0..n {
                    cells.push(grid.get(x + dx, y + dy).clone());
                }
            }
            patterns.push(Pattern::new(n, cells));
        }
    }
    patterns
}

/// The deduplicated, indexed set of patterns extracted from exemplars, with
/// frequency weights (§4.2). `weight[i] >= 1` for every pattern.
pub struct Catalog<T> {
    pub(crate) patterns: Vec<Pattern<T>>,
    pub(crate) weights: Vec<u32>,
    pub(crate) pattern_size: usize,
}

impl<T: Clone + Eq + Hash> Catalog<T> {
    /// Extract patterns from every exemplar and deduplicate them into a
    /// catalog with exact frequency weights.
    ///
    /// Errors if any exemplar is zero-sized (`DegenerateExemplar`), or if no
    /// patterns could be extracted from any exemplar at all
    /// (`EmptyCatalog`). An exemplar smaller than `pattern_size` in some
    /// dimension is not itself an error; it simply contributes nothing.
    pub fn build(exemplars: &[Grid<T>], pattern_size: usize) -> Result<Self, WfcError> {
        assert!(pattern_size >= 2, "pattern size must be at least 2");

        for (index, exemplar) in exemplars.iter().enumerate() {
            if exemplar.is_empty() {
                return Err(WfcError::DegenerateExemplar {
                    exemplar_index: index,
                });
            }
        }

        let mut index_of: HashMap<Pattern<T>, usize> = HashMap::new();
        let mut patterns: Vec<Pattern<T>> = Vec::new();
        let mut weights: Vec<u32> = Vec::new();

        for exemplar in exemplars {
            for pattern in extract_patterns(exemplar, pattern_size) {
                match index_of.get(&pattern) {
                    Some(&i) => weights[i] += 1,
                    None => {
                        let i = patterns.len();
                        index_of.insert(pattern.clone(), i);
                        patterns.push(pattern);
                        weights.push(1);
                    }
                }
            }
        }

        if patterns.is_empty() {
            return Err(WfcError::EmptyCatalog);
        }

        Ok(Self {
            patterns,
            weights,
            pattern_size,
        })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern(&self, index: usize) -> &Pattern<T> {
        &self.patterns[index]
    }

    pub fn weight(&self, index: usize) -> u32 {
        self.weights[index]
    }

    pub fn pattern_size(&self) -> usize {
        self.pattern_size
    }
}
