use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::events::AppEvent;
use crate::events::Direction;
use crate::events::Event;
use crate::events::SimEvent;
use crate::render::Layout;

/// Converts a crossterm event into a lifegrid event.
///
/// Clicking a cell toggles it, dragging across cells paints them. `layout` says where the grid
/// is on screen.
pub fn convert_event(event: CtEvent, layout: &Layout) -> Option<Event> {
    match event {
        CtEvent::Key(key_event) => convert_key(key_event),
        CtEvent::Mouse(mouse_event) => convert_mouse(mouse_event, layout),
        CtEvent::Resize(_, _) => Some(Event::AppEvent(AppEvent::Redraw)),
        _ => None,
    }
}

fn convert_key(key_event: KeyEvent) -> Option<Event> {
    // Some platforms report releases too
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    let event = match key_event {
        KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
        | KeyEvent {
            code: KeyCode::Char('q') | KeyCode::Esc,
            ..
        } => Event::AppEvent(AppEvent::Exit),

        KeyEvent {
            code: KeyCode::Char('k') | KeyCode::Up,
            ..
        } => Event::AppEvent(AppEvent::MoveCursor(Direction::Up)),
        KeyEvent {
            code: KeyCode::Char('j') | KeyCode::Down,
            ..
        } => Event::AppEvent(AppEvent::MoveCursor(Direction::Down)),
        KeyEvent {
            code: KeyCode::Char('h') | KeyCode::Left,
            ..
        } => Event::AppEvent(AppEvent::MoveCursor(Direction::Left)),
        KeyEvent {
            code: KeyCode::Char('l') | KeyCode::Right,
            ..
        } => Event::AppEvent(AppEvent::MoveCursor(Direction::Right)),

        KeyEvent {
            code: KeyCode::Char(' '),
            ..
        } => Event::AppEvent(AppEvent::ToggleAtCursor),
        KeyEvent {
            code: KeyCode::Char('p'),
            ..
        } => Event::AppEvent(AppEvent::PaintAtCursor),

        KeyEvent {
            code: KeyCode::Enter | KeyCode::Char('s'),
            ..
        } => Event::SimEvent(SimEvent::ToggleRunning),
        KeyEvent {
            code: KeyCode::Char('r'),
            ..
        } => Event::SimEvent(SimEvent::Randomize),
        KeyEvent {
            code: KeyCode::Char('c'),
            ..
        } => Event::SimEvent(SimEvent::Clear),

        _ => return None,
    };

    Some(event)
}

fn convert_mouse(mouse_event: MouseEvent, layout: &Layout) -> Option<Event> {
    let MouseEvent {
        kind, column, row, ..
    } = mouse_event;
    let (row, col) = layout.cell_at(column, row);

    match kind {
        MouseEventKind::Down(MouseButton::Left) => {
            Some(Event::SimEvent(SimEvent::Toggle { row, col }))
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            Some(Event::SimEvent(SimEvent::Paint { row, col }))
        }
        _ => None,
    }
}
