//! The wave (§3) and its worklist-based propagator (§4.4).
//!
//! Possibility sets are packed bitsets rather than the teacher's
//! `Vec<Vec<bool>>`, per the design note in §9: intersection/union become
//! bitwise AND/OR and cardinality becomes a popcount.

use crate::adjacency::AdjacencyRules;
use crate::direction::Direction;

/// A fixed-width bitset over `[0, len)`, backed by `u64` words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitset {
    words: Vec<u64>,
    len: usize,
}

impl Bitset {
    pub fn empty(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(64)],
            len,
        }
    }

    pub fn full(len: usize) -> Self {
        let mut bs = Self::empty(len);
        for i in 0..len {
            bs.set(i);
        }
        bs
    }

    pub fn singleton(len: usize, index: usize) -> Self {
        let mut bs = Self::empty(len);
        bs.set(index);
        bs
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_set(&self, index: usize) -> bool {
        (self.words[index / 64] >> (index % 64)) & 1 != 0
    }

    pub fn set(&mut self, index: usize) {
        self.words[index / 64] |= 1 << (index % 64);
    }

    pub fn clear(&mut self, index: usize) {
        self.words[index / 64] &= !(1 << (index % 64));
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.is_set(i))
    }

    pub fn union_with(&mut self, other: &Bitset) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
    }

    pub fn intersect_with(&mut self, other: &Bitset) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= b;
        }
    }

    pub fn intersection(&self, other: &Bitset) -> Bitset {
        let mut out = self.clone();
        out.intersect_with(other);
        out
    }
}

/// A W×H grid of possibility sets (§3). Initialized with every cell holding
/// every pattern index; shrinks monotonically as the solve progresses.
#[derive(Clone)]
pub struct Wave {
    pub width: usize,
    pub height: usize,
    num_patterns: usize,
    cells: Vec<Bitset>,
}

impl Wave {
    pub fn new_full(width: usize, height: usize, num_patterns: usize) -> Self {
        Self {
            width,
            height,
            num_patterns,
            cells: vec![Bitset::full(num_patterns); width * height],
        }
    }

    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn cell_coords(&self, cell: usize) -> (usize, usize) {
        (cell % self.width, cell / self.width)
    }

    pub fn possibilities(&self, cell: usize) -> &Bitset {
        &self.cells[cell]
    }

    pub fn is_collapsed(&self, cell: usize) -> bool {
        self.cells[cell].count_ones() == 1
    }

    pub fn is_contradicted(&self, cell: usize) -> bool {
        self.cells[cell].count_ones() == 0
    }

    /// Restrict `cell` to exactly `pattern` (used by collapse, §4.5 step 2).
    pub fn collapse_to(&mut self, cell: usize, pattern: usize) {
        self.cells[cell] = Bitset::singleton(self.num_patterns, pattern);
    }

    fn neighbor(&self, cell: usize, dir: Direction) -> Option<usize> {
        let (x, y) = self.cell_coords(cell);
        let nx = x as i32 + dir.dx();
        let ny = y as i32 + dir.dy();
        if nx < 0 || ny < 0 || nx as usize >= self.width || ny as usize >= self.height {
            None
        } else {
            Some(self.cell_index(nx as usize, ny as usize))
        }
    }

    /// Restore arc consistency starting from `seeds` (§4.4). Returns the
    /// coordinates of the first cell that contradicts (an empty possibility
    /// set), if any.
    pub fn propagate(
        &mut self,
        seeds: impl IntoIterator<Item = usize>,
        rules: &AdjacencyRules,
    ) -> Result<(), (usize, usize)> {
        let mut stack: Vec<usize> = seeds.into_iter().collect();

        while let Some(cell) = stack.pop() {
            for dir in Direction::ALL {
                let Some(neighbor) = self.neighbor(cell, dir) else {
                    continue;
                };

                let mut allowed = Bitset::empty(self.num_patterns);
                for i in self.cells[cell].iter() {
                    allowed.union_with(rules.allowed(i, dir));
                }

                let new_possibilities = self.cells[neighbor].intersection(&allowed);
                if new_possibilities != self.cells[neighbor] {
                    self.cells[neighbor] = new_possibilities;
                    if self.cells[neighbor].is_empty() {
                        return Err(self.cell_coords(neighbor));
                    }
                    stack.push(neighbor);
                }
            }
        }

        Ok(())
    }
}
