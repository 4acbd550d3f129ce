//! Overlapping-model Wave Function Collapse core.
//!
//! Learns a catalog of local N×N patterns from one or more exemplar grids,
//! derives directional adjacency constraints between them, and solves for a
//! new W×H tile grid by repeatedly collapsing the most-constrained cell and
//! propagating the consequences until the grid is fully resolved or a
//! contradiction forces a retry.
//!
//! Training-grid loading/sanitization, map repair, decorative filling,
//! visualization, and quality-metric evaluation are not part of this
//! crate; it exposes only pattern extraction, adjacency compilation, the
//! wave/propagator, and the solver loop.

pub mod adjacency;
pub mod direction;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod render;
pub mod solver;
pub mod wave;

pub use adjacency::{AdjacencyRules, TileAdjacency};
pub use direction::Direction;
pub use error::WfcError;
pub use grid::Grid;
pub use pattern::{Catalog, Pattern};
pub use render::{render_collapsed, render_partial};
pub use solver::{solve, SolveConfig, Solver, StepResult};
pub use wave::{Bitset, Wave};

#[cfg(feature = "image-io")]
pub use grid::Rgb;
