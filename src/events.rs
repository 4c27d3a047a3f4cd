use std::time::Instant;

use crate::GridOffset;
use crate::simulation::Edit;
use crate::simulation::Ignored;
use crate::simulation::Simulation;

pub enum Event {
    SimEvent(SimEvent),
    AppEvent(AppEvent),
}

/// Requests for the simulation core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// Flip a single cell
    Toggle { row: GridOffset, col: GridOffset },

    /// Bring a single cell to life
    Paint { row: GridOffset, col: GridOffset },

    Start,
    Stop,
    ToggleRunning,
    Randomize,
    Clear,
}

impl SimEvent {
    /// Forward the request to `sim`
    pub fn apply(self, sim: &mut Simulation, now: Instant) -> Edit {
        let changed = |changed: bool| {
            if changed {
                Edit::Applied
            } else {
                Edit::Ignored(Ignored::Unchanged)
            }
        };

        match self {
            SimEvent::Toggle { row, col } => sim.toggle_cell(row, col),
            SimEvent::Paint { row, col } => sim.paint_cell(row, col),
            SimEvent::Start => changed(sim.start(now)),
            SimEvent::Stop => changed(sim.stop()),
            SimEvent::ToggleRunning => {
                sim.toggle_running(now);
                Edit::Applied
            }
            SimEvent::Randomize => sim.randomize(),
            SimEvent::Clear => sim.clear(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Requests handled by the front end itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    MoveCursor(Direction),

    /// Flip the cell under the cursor
    ToggleAtCursor,

    /// Bring the cell under the cursor to life
    PaintAtCursor,

    /// The terminal changed size, everything needs drawing again
    Redraw,

    /// Exit the application
    Exit,
}
