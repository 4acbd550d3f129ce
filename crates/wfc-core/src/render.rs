//! Projecting a wave back to a tile grid (§4.6).

use crate::grid::Grid;
use crate::pattern::Catalog;
use crate::wave::Wave;

/// Project a fully-collapsed wave to a W×H tile grid.
///
/// Each collapsed cell renders to its unique pattern's center tile. Panics
/// if any cell is not collapsed — callers that may have a partial wave
/// should use [`render_partial`] instead.
pub fn render_collapsed<T: Clone>(wave: &Wave, catalog: &Catalog<T>) -> Grid<T> {
    let mut cells = Vec::with_capacity(wave.width * wave.height);
    for cell in 0..wave.width * wave.height {
        let possibilities = wave.possibilities(cell);
        let pattern_index = possibilities
            .iter()
            .next()
            .expect("render_collapsed requires every cell to be collapsed");
        cells.push(catalog.pattern(pattern_index).center().clone());
    }
    Grid::new(wave.width, wave.height, cells)
}

/// Project a (possibly partial) wave to a W×H tile grid, projecting
/// uncollapsed cells to `unknown`. Used by step-wise external observers
/// that render intermediate waves.
pub fn render_partial<T: Clone>(wave: &Wave, catalog: &Catalog<T>, unknown: &T) -> Grid<T> {
    let mut cells = Vec::with_capacity(wave.width * wave.height);
    for cell in 0..wave.width * wave.height {
        let possibilities = wave.possibilities(cell);
        let tile = if possibilities.count_ones() == 1 {
            let pattern_index = possibilities.iter().next().unwrap();
            catalog.pattern(pattern_index).center().clone()
        } else {
            unknown.clone()
        };
        cells.push(tile);
    }
    Grid::new(wave.width, wave.height, cells)
}
