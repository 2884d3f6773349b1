//! Translates crossterm events into editor [`Action`]s.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

use maze_core::Pos;

use crate::CELL_WIDTH;

/// What the user asked for while editing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Primary click: start, then end, then barriers.
    Place(Pos),
    /// Secondary click: reset the cell.
    Erase(Pos),
    Solve,
    Clear,
    Scatter,
    Quit,
}

/// A request raised while a search is animating.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// Stop the search, keep the editor open.
    Abort,
    /// Stop the search and leave.
    Quit,
}

/// Map a terminal position to the grid cell drawn there, if any.
///
/// Each cell is [`CELL_WIDTH`] columns wide and one line high, with the grid
/// drawn from the top-left corner.
pub fn cell_at(column: u16, line: u16, rows: i32) -> Option<Pos> {
    let p = Pos::new(line as i32, (column / CELL_WIDTH) as i32);
    (p.row < rows && p.col < rows).then_some(p)
}

fn translate_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Solve),
        KeyCode::Char('c') => Some(Action::Clear),
        KeyCode::Char('r') => Some(Action::Scatter),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Translate one crossterm event into an editing action.
pub fn translate(ev: Event, rows: i32) -> Option<Action> {
    match ev {
        Event::Key(key) => translate_key(key),
        Event::Mouse(me) => {
            let pos = cell_at(me.column, me.row, rows)?;
            match me.kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    Some(Action::Place(pos))
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => Some(Action::Erase(pos)),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Wait up to `timeout` for the next editing action.
pub fn next_action(
    timeout: Duration,
    rows: i32,
) -> Result<Option<Action>, Box<dyn std::error::Error>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?, rows))
}

/// Drain pending events without blocking and report an abort or quit key.
/// Everything else typed during a search is discarded.
pub fn poll_interrupt() -> Result<Option<Interrupt>, Box<dyn std::error::Error>> {
    let mut found = None;
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Esc => found = found.or(Some(Interrupt::Abort)),
                KeyCode::Char('q') => found = Some(Interrupt::Quit),
                _ => {}
            }
        }
    }
    Ok(found)
}
