//! Error kinds surfaced by the core (see spec §7).
//!
//! Only `Contradiction` is ever recovered internally, by the solver's
//! retry loop; everything else is returned to the caller.

use std::fmt;

/// Errors the core can surface to a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WfcError {
    /// An exemplar had zero width or height.
    DegenerateExemplar { exemplar_index: usize },
    /// No patterns could be extracted from any exemplar (all exemplars
    /// were smaller than the pattern size in at least one dimension).
    EmptyCatalog,
    /// The retry cap was exhausted without finding a solution.
    SolveFailed {
        attempts: u32,
        last_contradiction: Option<(usize, usize)>,
    },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WfcError::DegenerateExemplar { exemplar_index } => {
                write!(f, "exemplar {exemplar_index} is zero-sized")
            }
            WfcError::EmptyCatalog => {
                write!(f, "no patterns could be extracted from any exemplar")
            }
            WfcError::SolveFailed {
                attempts,
                last_contradiction,
            } => match last_contradiction {
                Some((x, y)) => write!(
                    f,
                    "solve failed after {attempts} attempts (last contradiction at ({x}, {y}))"
                ),
                None => write!(f, "solve failed after {attempts} attempts"),
            },
        }
    }
}

impl std::error::Error for WfcError {}
