use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use crate::grid::Grid;

/// How many previous generations are remembered. Two is enough to catch still lifes and period 2
/// oscillators, longer cycles go unnoticed.
pub const HISTORY_LEN: usize = 2;

/// Why the simulation stopped on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stagnation {
    /// The next generation is identical to the current one
    StillLife,

    /// The next generation repeats one that was seen recently
    Oscillation,
}

impl fmt::Display for Stagnation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stagnation::StillLife => write!(f, "still life"),
            Stagnation::Oscillation => write!(f, "oscillation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The new generation replaces the current one
    Accept,

    /// The new generation is discarded and stepping stops
    Halt(Stagnation),
}

/// The last few generations, most recent first.
///
/// Snapshots are shared with whoever else holds them, nothing is copied when a generation is
/// remembered.
#[derive(Debug, Default, Clone)]
pub struct History {
    snapshots: VecDeque<Arc<Grid>>,
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: VecDeque::with_capacity(HISTORY_LEN + 1),
        }
    }

    /// Judge the generation `next`, computed from `prev`.
    ///
    /// On [`Verdict::Accept`], `prev` is remembered and the oldest snapshot is dropped past
    /// [`HISTORY_LEN`]. On [`Verdict::Halt`] the history is left as is.
    pub fn observe(&mut self, prev: &Arc<Grid>, next: &Grid) -> Verdict {
        if **prev == *next {
            return Verdict::Halt(Stagnation::StillLife);
        }

        if self.contains(next) {
            return Verdict::Halt(Stagnation::Oscillation);
        }

        self.snapshots.push_front(Arc::clone(prev));
        self.snapshots.truncate(HISTORY_LEN);

        Verdict::Accept
    }

    /// Whether `grid` matches any remembered generation
    pub fn contains(&self, grid: &Grid) -> bool {
        self.snapshots.iter().any(|s| **s == *grid)
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Remembered generations, most recent first
    pub fn iter(&self) -> impl Iterator<Item = &Grid> {
        self.snapshots.iter().map(|s| s.as_ref())
    }
}
