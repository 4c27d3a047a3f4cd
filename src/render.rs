use crate::GridOffset;
use crate::events::Direction;
use crate::simulation::Snapshot;
use crate::stepper::RunState;

/// Terminal columns taken by a single cell. Terminal cells are about twice as tall as they are
/// wide, two columns keep the grid square.
pub const CELL_WIDTH: u16 = 2;

const ALIVE: &str = "██";
const DEAD: &str = "  ";
const CURSOR_ALIVE: &str = "▓▓";
const CURSOR_DEAD: &str = "[]";

const HELP: &str = "space toggle  p paint  enter run/stop  r randomize  c clear  q quit";

/// Where the grid sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Terminal column of the top left cell
    pub column: u16,

    /// Terminal row of the top left cell
    pub row: u16,
}

impl Default for Layout {
    /// The grid is drawn in the top left corner, inside a one character border
    fn default() -> Self {
        Self { column: 1, row: 1 }
    }
}

impl Layout {
    /// Grid coordinates under the terminal position `(column, row)`. Positions left of or above
    /// the grid give negative coordinates, which the simulation ignores like any other out of
    /// range cell.
    pub fn cell_at(&self, column: u16, row: u16) -> (GridOffset, GridOffset) {
        let dx = column as GridOffset - self.column as GridOffset;
        let dy = row as GridOffset - self.row as GridOffset;

        (dy, dx.div_euclid(CELL_WIDTH as GridOffset))
    }
}

/// Keyboard cursor over the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Cursor {
    /// Move one cell in `direction`, staying on a `size` by `size` grid
    pub fn step(&mut self, direction: Direction, size: usize) {
        let last = size.saturating_sub(1);

        match direction {
            Direction::Up => self.row = self.row.saturating_sub(1),
            Direction::Down => self.row = (self.row + 1).min(last),
            Direction::Left => self.col = self.col.saturating_sub(1),
            Direction::Right => self.col = (self.col + 1).min(last),
        }
    }

    pub fn position(&self) -> (GridOffset, GridOffset) {
        (self.row as GridOffset, self.col as GridOffset)
    }
}

/// Turns snapshots into text.
///
/// The frame buffer is kept around between renders so drawing doesn't allocate once warmed up.
#[derive(Debug, Default)]
pub struct Frame {
    fb: String,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the grid inside a border, followed by a status line and a help line. No line ends in
    /// whitespace.
    pub fn render(&mut self, snapshot: &Snapshot, cursor: Option<Cursor>) -> &str {
        let grid = &snapshot.grid;
        let border = "─".repeat(grid.size() * CELL_WIDTH as usize);

        self.fb.clear();

        self.fb.push('┌');
        self.fb.push_str(&border);
        self.fb.push_str("┐\n");

        for (row, cells) in grid.rows().enumerate() {
            self.fb.push('│');

            for (col, &alive) in cells.iter().enumerate() {
                let here = cursor.is_some_and(|c| c.row == row && c.col == col);

                self.fb.push_str(match (alive, here) {
                    (true, false) => ALIVE,
                    (false, false) => DEAD,
                    (true, true) => CURSOR_ALIVE,
                    (false, true) => CURSOR_DEAD,
                });
            }

            self.fb.push_str("│\n");
        }

        self.fb.push('└');
        self.fb.push_str(&border);
        self.fb.push_str("┘\n");

        self.fb.push_str(&format!(
            "generation {} · {} alive · {}",
            snapshot.generation,
            grid.live_count(),
            snapshot.state
        ));

        if let (RunState::Idle, Some(reason)) = (snapshot.state, snapshot.stagnation) {
            self.fb.push_str(&format!(" ({reason})"));
        }

        self.fb.push('\n');
        self.fb.push_str(HELP);
        self.fb.push('\n');

        &self.fb
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::grid::Grid;
    use crate::history::Stagnation;

    fn snapshot(rows: &[&str]) -> Snapshot {
        Snapshot {
            grid: Arc::new(Grid::from_rows(rows).unwrap()),
            state: RunState::Idle,
            generation: 0,
            stagnation: None,
        }
    }

    #[test]
    fn renders_glider() {
        let mut frame = Frame::new();
        let snapshot = snapshot(&[".#...", "..#..", "###..", ".....", "....."]);

        insta::assert_snapshot!(frame.render(&snapshot, None), @"
┌──────────┐
│  ██      │
│    ██    │
│██████    │
│          │
│          │
└──────────┘
generation 0 · 5 alive · idle
space toggle  p paint  enter run/stop  r randomize  c clear  q quit
");
    }

    #[test]
    fn renders_cursor_and_stagnation() {
        let mut frame = Frame::new();
        let mut snapshot = snapshot(&["##.", "##.", "..."]);
        snapshot.generation = 12;
        snapshot.stagnation = Some(Stagnation::StillLife);

        let cursor = Cursor { row: 1, col: 1 };
        insta::assert_snapshot!(frame.render(&snapshot, Some(cursor)), @"
┌──────┐
│████  │
│██▓▓  │
│      │
└──────┘
generation 12 · 4 alive · idle (still life)
space toggle  p paint  enter run/stop  r randomize  c clear  q quit
");

        let cursor = Cursor { row: 2, col: 2 };
        snapshot.state = RunState::Running;
        insta::assert_snapshot!(frame.render(&snapshot, Some(cursor)), @"
┌──────┐
│████  │
│████  │
│    []│
└──────┘
generation 12 · 4 alive · running
space toggle  p paint  enter run/stop  r randomize  c clear  q quit
");
    }

    #[test]
    fn cell_at_maps_terminal_positions() {
        let layout = Layout::default();

        assert_eq!(layout.cell_at(1, 1), (0, 0));
        assert_eq!(layout.cell_at(2, 1), (0, 0));
        assert_eq!(layout.cell_at(3, 1), (0, 1));
        assert_eq!(layout.cell_at(8, 4), (3, 3));

        // on the border
        assert_eq!(layout.cell_at(0, 0), (-1, -1));
    }

    #[test]
    fn cursor_stays_on_the_grid() {
        let mut cursor = Cursor::default();

        cursor.step(Direction::Up, 3);
        cursor.step(Direction::Left, 3);
        assert_eq!(cursor, Cursor { row: 0, col: 0 });

        for _ in 0..5 {
            cursor.step(Direction::Down, 3);
            cursor.step(Direction::Right, 3);
        }
        assert_eq!(cursor, Cursor { row: 2, col: 2 });
    }
}
