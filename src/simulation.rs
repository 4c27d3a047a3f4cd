use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use rand::Rng;
use tracing::debug;
use tracing::info;

use crate::GridOffset;
use crate::config::Config;
use crate::config::ConfigError;
use crate::engine;
use crate::grid::Grid;
use crate::history::History;
use crate::history::Stagnation;
use crate::history::Verdict;
use crate::stepper::RunState;
use crate::stepper::Stepper;

/// Why a request left the simulation untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Edits, clears and randomizes are only accepted while idle
    Running,

    /// The coordinates are not on the grid
    OutOfBounds,

    /// The request would not change anything
    Unchanged,
}

impl fmt::Display for Ignored {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ignored::Running => write!(f, "simulation is running"),
            Ignored::OutOfBounds => write!(f, "cell is out of bounds"),
            Ignored::Unchanged => write!(f, "nothing to change"),
        }
    }
}

/// Outcome of a request from the presentation layer. Rejections are not errors, they simply don't
/// do anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Applied,
    Ignored(Ignored),
}

/// What the presentation layer gets to see.
///
/// The grid is shared, not borrowed: the simulation never writes to a grid once it has been handed
/// out, so a snapshot stays valid for as long as it is held.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub state: RunState,

    /// Generations computed since the last clear or randomize
    pub generation: u64,

    /// Set when the last halt was the simulation stopping itself
    pub stagnation: Option<Stagnation>,
}

type Subscriber = Box<dyn FnMut(&Snapshot)>;

/// The whole game: the grid, the recent generations, and the stepper driving it.
pub struct Simulation {
    config: Config,
    grid: Arc<Grid>,
    history: History,
    stepper: Stepper,
    generation: u64,
    stagnation: Option<Stagnation>,
    subscribers: Vec<Subscriber>,
}

impl Simulation {
    /// Create an idle simulation on an empty grid
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.size);
        Ok(Self::from_parts(config, grid))
    }

    /// Create an idle simulation starting from `grid`. The configured size is replaced by the size
    /// of `grid`.
    pub fn with_grid(mut config: Config, grid: Grid) -> Result<Self, ConfigError> {
        config.size = grid.size();
        config.validate()?;

        Ok(Self::from_parts(config, grid))
    }

    fn from_parts(config: Config, grid: Grid) -> Self {
        let stepper = Stepper::new(config.tick);

        Self {
            config,
            grid: Arc::new(grid),
            history: History::new(),
            stepper,
            generation: 0,
            stagnation: None,
            subscribers: Vec::new(),
        }
    }

    /// Call `f` with a fresh snapshot every time the grid or the run state changes
    pub fn subscribe<F>(&mut self, f: F)
    where
        F: FnMut(&Snapshot) + 'static,
    {
        self.subscribers.push(Box::new(f));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: Arc::clone(&self.grid),
            state: self.stepper.state(),
            generation: self.generation,
            stagnation: self.stagnation,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn state(&self) -> RunState {
        self.stepper.state()
    }

    pub fn is_running(&self) -> bool {
        self.stepper.is_running()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stagnation(&self) -> Option<Stagnation> {
        self.stagnation
    }

    /// When the next generation is due, if running
    pub fn next_deadline(&self) -> Option<Instant> {
        self.stepper.next_deadline()
    }

    /// How long until the next generation is due, if running
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.stepper.time_left(now)
    }

    /// Flip a single cell. Rejected while running.
    pub fn toggle_cell(&mut self, row: GridOffset, col: GridOffset) -> Edit {
        self.edit_cell(row, col, |alive| !alive)
    }

    /// Bring a single cell to life, as when dragging across the grid. Rejected while running.
    pub fn paint_cell(&mut self, row: GridOffset, col: GridOffset) -> Edit {
        self.edit_cell(row, col, |_| true)
    }

    fn edit_cell<F>(&mut self, row: GridOffset, col: GridOffset, f: F) -> Edit
    where
        F: FnOnce(bool) -> bool,
    {
        if let Some(reason) = self.reject_while_running() {
            return self.ignore("edit", reason);
        }

        let Some(alive) = self.grid.get(row, col) else {
            return self.ignore("edit", Ignored::OutOfBounds);
        };

        let next = f(alive);
        if next == alive {
            return Edit::Ignored(Ignored::Unchanged);
        }

        // Anyone still holding the previous snapshot keeps their own copy
        Arc::make_mut(&mut self.grid).set(row, col, next);
        self.stagnation = None;

        debug!(row, col, alive = next, "Edited cell");
        self.publish();

        Edit::Applied
    }

    /// Fill the grid at random using the configured density, and forget the history.
    pub fn randomize(&mut self) -> Edit {
        self.randomize_with(&mut rand::rng())
    }

    /// Like [`Simulation::randomize`], with a given source of randomness
    pub fn randomize_with<R: Rng>(&mut self, rng: &mut R) -> Edit {
        if let Some(reason) = self.reject_while_running() {
            return self.ignore("randomize", reason);
        }

        let grid = Grid::random(self.config.size, self.config.density, rng);
        self.reset(grid);

        info!(live = self.grid.live_count(), "Randomized grid");
        self.publish();

        Edit::Applied
    }

    /// Kill every cell, and forget the history.
    pub fn clear(&mut self) -> Edit {
        if let Some(reason) = self.reject_while_running() {
            return self.ignore("clear", reason);
        }

        self.reset(Grid::new(self.config.size));

        info!("Cleared grid");
        self.publish();

        Edit::Applied
    }

    fn reset(&mut self, grid: Grid) {
        self.grid = Arc::new(grid);
        self.history.clear();
        self.generation = 0;
        self.stagnation = None;
    }

    /// Start computing generations, the first one due an interval after `now`. Returns `false` if
    /// already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.stepper.start(now) {
            return false;
        }

        self.stagnation = None;

        info!(generation = self.generation, "Started");
        self.publish();

        true
    }

    /// Stop computing generations. Returns `false` if already idle.
    pub fn stop(&mut self) -> bool {
        if !self.stepper.stop() {
            return false;
        }

        info!(generation = self.generation, "Stopped");
        self.publish();

        true
    }

    /// Start if idle, stop if running. Returns the new run state.
    pub fn toggle_running(&mut self, now: Instant) -> RunState {
        if self.is_running() {
            self.stop();
        } else {
            self.start(now);
        }

        self.state()
    }

    /// Compute the next generation if one is due at `now`.
    ///
    /// Returns `None` when idle or when the tick is not due yet.
    pub fn poll(&mut self, now: Instant) -> Option<Verdict> {
        if !self.stepper.poll(now) {
            return None;
        }

        Some(self.advance())
    }

    fn advance(&mut self) -> Verdict {
        let next = engine::step(&self.grid);
        let verdict = self.history.observe(&self.grid, &next);

        match verdict {
            Verdict::Accept => {
                self.grid = Arc::new(next);
                self.generation += 1;

                debug!(generation = self.generation, "Stepped");
            }
            Verdict::Halt(reason) => {
                self.stepper.stop();
                self.stagnation = Some(reason);

                info!(generation = self.generation, %reason, "Stagnated, stopping");
            }
        }

        self.publish();

        verdict
    }

    fn reject_while_running(&self) -> Option<Ignored> {
        self.is_running().then_some(Ignored::Running)
    }

    fn ignore(&self, what: &str, reason: Ignored) -> Edit {
        debug!(%reason, "Ignoring {what}");

        Edit::Ignored(reason)
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for subscriber in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }
}
