//! Entropy-driven cell selection, weighted collapse, and the retry loop
//! (§4.5), plus the step-wise driver for external visualizers (§6).

use std::hash::Hash;

use rand::{Rng, RngCore, SeedableRng};
use rand::rngs::StdRng;

use crate::adjacency::AdjacencyRules;
use crate::error::WfcError;
use crate::grid::Grid;
use crate::pattern::Catalog;
use crate::render;
use crate::wave::Wave;

/// Configuration recognized by the core (§6).
#[derive(Clone, Debug)]
pub struct SolveConfig {
    /// The overlapping window size (N in N×N).
    pub pattern_size: usize,
    pub output_width: usize,
    pub output_height: usize,
    /// RNG seed for reproducibility; `None` seeds from system entropy.
    pub seed: Option<u64>,
    /// Retry cap for contradictions.
    pub max_attempts: u32,
    /// Whether the adjacency compiler's center-tile condition applies.
    pub use_center_tile_filter: bool,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            pattern_size: 3,
            output_width: 32,
            output_height: 32,
            seed: None,
            max_attempts: 1000,
            use_center_tile_filter: true,
        }
    }
}

/// Outcome of a single collapse+propagate step, for external step-wise
/// drivers (§6's streaming interface).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A cell was collapsed and propagation succeeded without contradiction.
    Progress,
    /// No uncollapsed cell remains.
    Done,
    /// Propagation emptied the cell at the given coordinates.
    Failed { at: (usize, usize) },
}

/// One end-to-end solve attempt, from a fresh wave (see glossary: Attempt).
///
/// Owns nothing but its own wave; catalog and adjacency rules are shared by
/// reference and read-only across solves, per §5.
pub struct Solver<'a, T> {
    catalog: &'a Catalog<T>,
    rules: &'a AdjacencyRules,
    wave: Wave,
}

impl<'a, T: Clone + Eq + Hash> Solver<'a, T> {
    pub fn new(catalog: &'a Catalog<T>, rules: &'a AdjacencyRules, width: usize, height: usize) -> Self {
        Self {
            catalog,
            rules,
            wave: Wave::new_full(width, height, catalog.len()),
        }
    }

    pub fn wave(&self) -> &Wave {
        &self.wave
    }

    pub fn catalog(&self) -> &Catalog<T> {
        self.catalog
    }

    /// Find the uncollapsed cell with minimum Shannon entropy over its
    /// weight-normalized possibility distribution, breaking ties with a
    /// small random jitter (§4.5 step 1). `None` if every cell is collapsed.
    fn select_cell(&self, rng: &mut impl Rng) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for cell in 0..self.wave.width * self.wave.height {
            let possibilities = self.wave.possibilities(cell);
            if possibilities.count_ones() <= 1 {
                continue;
            }

            let mut sum_weight = 0.0;
            let mut sum_weight_log2_weight = 0.0;
            for pattern in possibilities.iter() {
                let w = self.catalog.weight(pattern) as f64;
                sum_weight += w;
                sum_weight_log2_weight += w * w.log2();
            }
            let entropy = sum_weight.log2() - sum_weight_log2_weight / sum_weight;
            let jittered = entropy + rng.random::<f64>() * 1e-6;

            if best.is_none_or(|(_, best_entropy)| jittered < best_entropy) {
                best = Some((cell, jittered));
            }
        }

        best.map(|(cell, _)| cell)
    }

    /// Sample one pattern index from `cell`'s possibility set with
    /// probability proportional to its weight, and restrict `cell` to it
    /// (§4.5 step 2).
    fn collapse(&mut self, cell: usize, rng: &mut impl Rng) -> usize {
        let choices: Vec<usize> = self.wave.possibilities(cell).iter().collect();
        let total: u64 = choices.iter().map(|&i| self.catalog.weight(i) as u64).sum();

        let mut r = rng.random_range(0..total);
        let mut chosen = choices[0];
        for &i in &choices {
            let w = self.catalog.weight(i) as u64;
            if r < w {
                chosen = i;
                break;
            }
            r -= w;
        }

        self.wave.collapse_to(cell, chosen);
        chosen
    }

    /// Perform one select+collapse+propagate step.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepResult {
        let Some(cell) = self.select_cell(rng) else {
            return StepResult::Done;
        };

        self.collapse(cell, rng);

        match self.wave.propagate(std::iter::once(cell), self.rules) {
            Ok(()) => StepResult::Progress,
            Err(at) => StepResult::Failed { at },
        }
    }

    /// Run until the wave is fully resolved or a contradiction arises.
    pub fn run(&mut self, rng: &mut impl Rng) -> Result<(), (usize, usize)> {
        loop {
            match self.step(rng) {
                StepResult::Progress => continue,
                StepResult::Done => return Ok(()),
                StepResult::Failed { at } => return Err(at),
            }
        }
    }
}

fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

/// Run the solver loop to completion, restarting with a fresh wave on every
/// contradiction, up to `config.max_attempts` (§4.5's state machine, §7's
/// retry policy).
pub fn solve<T: Clone + Eq + Hash>(
    catalog: &Catalog<T>,
    rules: &AdjacencyRules,
    config: &SolveConfig,
) -> Result<Grid<T>, WfcError> {
    let mut rng = make_rng(config.seed);
    let mut last_contradiction = None;

    for _attempt in 0..config.max_attempts {
        let mut solver = Solver::new(catalog, rules, config.output_width, config.output_height);
        match solver.run(&mut *rng) {
            Ok(()) => return Ok(render::render_collapsed(solver.wave(), catalog)),
            Err(at) => last_contradiction = Some(at),
        }
    }

    Err(WfcError::SolveFailed {
        attempts: config.max_attempts,
        last_contradiction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjacency::TileAdjacency;

    fn build<T: Clone + Eq + Hash>(
        exemplars: &[Grid<T>],
        pattern_size: usize,
        use_center_filter: bool,
    ) -> (Catalog<T>, AdjacencyRules) {
        let catalog = Catalog::build(exemplars, pattern_size).unwrap();
        let tile_adj = TileAdjacency::build(exemplars);
        let rules = AdjacencyRules::compile(&catalog, &tile_adj, use_center_filter);
        (catalog, rules)
    }

    #[test]
    fn uniform_exemplar_always_produces_uniform_output() {
        let exemplar = Grid::filled(3, 3, '.');
        let (catalog, rules) = build(&[exemplar], 2, true);
        let config = SolveConfig {
            pattern_size: 2,
            output_width: 10,
            output_height: 10,
            seed: Some(42),
            max_attempts: 10,
            use_center_tile_filter: true,
        };
        let grid = solve(&catalog, &rules, &config).unwrap();
        assert!(grid.rows().all(|row| row.iter().all(|&c| c == '.')));
    }

    #[test]
    fn single_pattern_catalog_collapses_with_zero_entropy_choices() {
        let exemplar = Grid::filled(2, 2, 'X');
        let (catalog, rules) = build(&[exemplar], 2, true);
        assert_eq!(catalog.len(), 1);

        let config = SolveConfig {
            pattern_size: 2,
            output_width: 4,
            output_height: 4,
            seed: Some(1),
            max_attempts: 1,
            use_center_tile_filter: true,
        };
        let grid = solve(&catalog, &rules, &config).unwrap();
        assert!(grid.rows().all(|row| row.iter().all(|&c| c == 'X')));
    }

    #[test]
    fn checkerboard_output_is_a_perfect_checkerboard() {
        let cells: Vec<char> = (0..25)
            .map(|i| {
                let (x, y) = (i % 5, i / 5);
                if (x + y) % 2 == 0 { 'A' } else { 'B' }
            })
            .collect();
        let exemplar = Grid::new(5, 5, cells);
        let (catalog, rules) = build(&[exemplar], 2, true);

        let config = SolveConfig {
            pattern_size: 2,
            output_width: 8,
            output_height: 8,
            seed: Some(7),
            max_attempts: 200,
            use_center_tile_filter: true,
        };
        let grid = solve(&catalog, &rules, &config).unwrap();
        let top_left_is_a = *grid.get(0, 0) == 'A';
        for y in 0..grid.height {
            for x in 0..grid.width {
                let tile = *grid.get(x, y);
                assert!(tile == 'A' || tile == 'B');
                let same_phase_as_origin = (x + y) % 2 == 0;
                let expected = if same_phase_as_origin { top_left_is_a } else { !top_left_is_a };
                assert_eq!(tile == 'A', expected);
            }
        }
    }

    #[test]
    fn same_seed_yields_byte_for_byte_identical_output() {
        let exemplar = Grid::filled(4, 4, '.');
        let mut exemplar = exemplar;
        exemplar.set(1, 1, 'X');
        let (catalog, rules) = build(&[exemplar], 3, true);

        let config = SolveConfig {
            pattern_size: 3,
            output_width: 12,
            output_height: 12,
            seed: Some(123),
            max_attempts: 100,
            use_center_tile_filter: true,
        };

        let a = solve(&catalog, &rules, &config).unwrap();
        let b = solve(&catalog, &rules, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn disconnected_tiles_never_mix_under_center_filter() {
        // A only neighbors A, B only neighbors B.
        let exemplar = Grid::new(
            4,
            4,
            vec![
                'A', 'A', 'B', 'B', 'A', 'A', 'B', 'B', 'A', 'A', 'B', 'B', 'A', 'A', 'B', 'B',
            ],
        );
        let (catalog, rules) = build(&[exemplar], 2, true);

        let config = SolveConfig {
            pattern_size: 2,
            output_width: 6,
            output_height: 6,
            seed: Some(99),
            max_attempts: 500,
            use_center_tile_filter: true,
        };
        let grid = solve(&catalog, &rules, &config).unwrap();
        let has_a = grid.rows().any(|row| row.contains(&'A'));
        let has_b = grid.rows().any(|row| row.contains(&'B'));
        assert!(!(has_a && has_b), "A and B must never both appear");
    }

    #[test]
    fn retry_cap_exhaustion_surfaces_solve_failed() {
        // Two tiles that can never be adjacent at all (no overlap possible)
        // packed into a tiny catalog with a large output forces frequent
        // contradictions; a max_attempts of 1 all but guarantees failure
        // is surfaced rather than the loop hanging.
        let exemplar = Grid::new(2, 1, vec!['A', 'B']);
        let (catalog, rules) = build(&[exemplar], 2, true);
        let config = SolveConfig {
            pattern_size: 2,
            output_width: 20,
            output_height: 20,
            seed: Some(5),
            max_attempts: 1,
            use_center_tile_filter: true,
        };
        // Either it solves or it reports SolveFailed; it must not hang, and
        // if it fails the error carries the attempt count.
        match solve(&catalog, &rules, &config) {
            Ok(_) => {}
            Err(WfcError::SolveFailed { attempts, .. }) => assert_eq!(attempts, 1),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
}
