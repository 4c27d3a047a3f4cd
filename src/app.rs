use std::io;
use std::io::Write;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::execute;
use crossterm::queue;
use crossterm::style;
use crossterm::terminal;
use tracing::debug;

use crate::events::AppEvent;
use crate::events::Event;
use crate::events::SimEvent;
use crate::io::convert_event;
use crate::render::Cursor;
use crate::render::Frame;
use crate::render::Layout;
use crate::simulation::Simulation;

/// How long to wait for input while idle. Nothing changes on its own then, this only bounds how
/// long a missed redraw could go unnoticed.
pub const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Terminal front end state around a [`Simulation`]
pub struct App {
    sim: Simulation,
    layout: Layout,
    cursor: Cursor,
    frame: Frame,

    /// Something changed since the last draw
    dirty: bool,

    /// The terminal was resized, stale characters may be left around the grid
    clear_screen: bool,
}

impl App {
    pub fn new(sim: Simulation) -> Self {
        Self {
            sim,
            layout: Layout::default(),
            cursor: Cursor::default(),
            frame: Frame::new(),
            dirty: true,
            clear_screen: false,
        }
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// How long to wait for input before the next generation is due
    pub fn timeout(&self, now: Instant) -> Duration {
        self.sim.time_left(now).unwrap_or(IDLE_POLL)
    }

    /// Handle the terminal event that arrived, if any, then compute the next generation if it is
    /// due. Events that don't mean anything here still get the tick checked.
    pub fn update(&mut self, event: Option<CtEvent>, now: Instant) -> Flow {
        if let Some(event) = event.and_then(|e| convert_event(e, &self.layout)) {
            if self.handle(event, now) == Flow::Exit {
                return Flow::Exit;
            }
        }

        if self.sim.poll(now).is_some() {
            self.dirty = true;
        }

        Flow::Continue
    }

    fn handle(&mut self, event: Event, now: Instant) -> Flow {
        let size = self.sim.grid().size();

        let request = match event {
            Event::SimEvent(request) => Some(request),
            Event::AppEvent(AppEvent::Exit) => return Flow::Exit,
            Event::AppEvent(AppEvent::Redraw) => {
                self.clear_screen = true;
                None
            }
            Event::AppEvent(AppEvent::MoveCursor(direction)) => {
                self.cursor.step(direction, size);
                None
            }
            Event::AppEvent(AppEvent::ToggleAtCursor) => {
                let (row, col) = self.cursor.position();
                Some(SimEvent::Toggle { row, col })
            }
            Event::AppEvent(AppEvent::PaintAtCursor) => {
                let (row, col) = self.cursor.position();
                Some(SimEvent::Paint { row, col })
            }
        };

        if let Some(request) = request {
            let edit = request.apply(&mut self.sim, now);
            debug!(?request, ?edit, "Handled request");
        }

        // Cursor moves and resizes need a redraw as much as edits do
        self.dirty = true;

        Flow::Continue
    }

    /// Write the current frame to `w`, if anything changed since the last one.
    pub fn draw<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }

        if self.clear_screen {
            queue!(w, terminal::Clear(terminal::ClearType::All))?;
            self.clear_screen = false;
        }

        let snapshot = self.sim.snapshot();

        // Edits are refused while running, no point showing where they would land
        let selected = (!self.sim.is_running()).then_some(self.cursor);
        let s = self.frame.render(&snapshot, selected);

        queue!(w, cursor::MoveTo(0, 0))?;

        for line in s.lines() {
            queue!(
                w,
                terminal::Clear(terminal::ClearType::CurrentLine),
                style::Print(line),
                cursor::MoveToNextLine(1)
            )?;
        }

        w.flush()?;
        self.dirty = false;

        Ok(())
    }
}

/// Switch `w` to the alternate screen, with mouse reporting on and the cursor hidden
pub fn enter_screen<W: Write>(w: &mut W) -> io::Result<()> {
    execute!(
        w,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )
}

/// Undo [`enter_screen`] on `w`, then leave raw mode with `disable_raw_mode`.
///
/// Both steps are always attempted. The first error is returned.
pub fn restore_terminal<W, F>(w: &mut W, disable_raw_mode: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce() -> io::Result<()>,
{
    let screen = execute!(
        w,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    );
    let raw = disable_raw_mode();

    screen.and(raw)
}
