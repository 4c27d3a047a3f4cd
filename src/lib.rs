//! Conway's Game of Life on a small, fixed size grid.
//!
//! [`simulation::Simulation`] owns the grid and everything needed to run it. Front ends send it
//! requests and draw the [`simulation::Snapshot`]s it publishes.

pub mod app;
pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod history;
pub mod io;
pub mod render;
pub mod rule_set;
pub mod simulation;
pub mod stepper;

/// Signed so that requests from the outside, like a click left of the grid, can be represented
/// and rejected instead of wrapping around.
pub type GridOffset = i32;
