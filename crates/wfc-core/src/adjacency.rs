//! The tile adjacency table (§3) and the adjacency compiler (§4.3).

use std::collections::HashSet;
use std::hash::Hash;

use crate::direction::Direction;
use crate::grid::Grid;
use crate::pattern::Catalog;
use crate::wave::Bitset;

/// For each cardinal direction, the set of ordered tile pairs `(t1, t2)`
/// such that `t2` appears at that direction from `t1` somewhere in some
/// exemplar (§3). Encodes what the exemplar tile mosaic itself permits,
/// independent of patterns.
pub struct TileAdjacency<T> {
    pairs: [HashSet<(T, T)>; 4],
}

impl<T: Clone + Eq + Hash> TileAdjacency<T> {
    /// Scan every exemplar and record every observed ordered tile pair in
    /// each direction.
    pub fn build(exemplars: &[Grid<T>]) -> Self {
        let mut pairs: [HashSet<(T, T)>; 4] =
            [HashSet::new(), HashSet::new(), HashSet::new(), HashSet::new()];

        for grid in exemplars {
            for y in 0..grid.height {
                for x in 0..grid.width {
                    let t1 = grid.get(x, y).clone();
                    for dir in Direction::ALL {
                        let nx = x as i32 + dir.dx();
                        let ny = y as i32 + dir.dy();
                        if nx < 0 || ny < 0 || nx as usize >= grid.width || ny as usize >= grid.height
                        {
                            continue;
                        }
                        let t2 = grid.get(nx as usize, ny as usize).clone();
                        pairs[dir as usize].insert((t1.clone(), t2));
                    }
                }
            }
        }

        Self { pairs }
    }

    pub fn contains(&self, dir: Direction, t1: &T, t2: &T) -> bool {
        self.pairs[dir as usize].contains(&(t1.clone(), t2.clone()))
    }
}

/// `A[i][d]`: for each pattern index and direction, the set of pattern
/// indices legally adjacent to it in that direction (§4.3).
pub struct AdjacencyRules {
    /// Indexed `[pattern][direction]`.
    allowed: Vec<[Bitset; 4]>,
}

impl AdjacencyRules {
    /// Compile adjacency rules for every ordered pair of patterns in
    /// `catalog` and every direction. When `use_center_filter` is true,
    /// both the border-overlap condition and the center-tile legality
    /// condition must hold; when false, only border overlap is required.
    pub fn compile<T: Clone + Eq + Hash + Sync>(
        catalog: &Catalog<T>,
        tile_adjacency: &TileAdjacency<T>,
        use_center_filter: bool,
    ) -> Self {
        let p = catalog.len();
        let compute_row = |i: usize| -> [Bitset; 4] {
            let mut row = [
                Bitset::empty(p),
                Bitset::empty(p),
                Bitset::empty(p),
                Bitset::empty(p),
            ];
            let pi = catalog.pattern(i);
            for j in 0..p {
                let pj = catalog.pattern(j);
                for dir in Direction::ALL {
                    if !pi.borders_agree(pj, dir) {
                        continue;
                    }
                    if use_center_filter
                        && !tile_adjacency.contains(dir, pi.center(), pj.center())
                    {
                        continue;
                    }
                    row[dir as usize].set(j);
                }
            }
            row
        };

        #[cfg(feature = "parallel")]
        let allowed: Vec<[Bitset; 4]> = {
            use rayon::prelude::*;
            (0..p).into_par_iter().map(compute_row).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let allowed: Vec<[Bitset; 4]> = (0..p).map(compute_row).collect();

        Self { allowed }
    }

    pub fn allowed(&self, pattern: usize, dir: Direction) -> &Bitset {
        &self.allowed[pattern][dir as usize]
    }

    pub fn num_patterns(&self) -> usize {
        self.allowed.len()
    }
}
