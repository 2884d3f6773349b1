//! Crossterm terminal front-end for the maze solver.
//!
//! [`Terminal`] owns the screen: it switches to the alternate screen, maps
//! each [`CellState`] to a colour and redraws only the cells that changed
//! since the previous flush. [`input`] turns key presses and mouse clicks
//! into editing actions.

pub mod input;

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, event, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use maze_core::{CellState, Grid};

pub use input::{Action, Interrupt};

/// Terminal columns used per cell; two keeps cells roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Background colour used for each cell state.
pub fn state_color(state: CellState) -> Color {
    match state {
        CellState::Free => Color::Rgb { r: 0, g: 0, b: 0 },
        CellState::Barrier => Color::Rgb { r: 255, g: 255, b: 255 },
        CellState::Start => Color::Rgb { r: 255, g: 165, b: 0 },
        CellState::End => Color::Rgb { r: 64, g: 224, b: 208 },
        CellState::Open => Color::Rgb { r: 255, g: 0, b: 0 },
        CellState::Closed => Color::Rgb { r: 0, g: 255, b: 0 },
        CellState::Path => Color::Rgb { r: 128, g: 0, b: 128 },
    }
}

/// The terminal screen, with the last drawn state of every cell.
pub struct Terminal {
    out: Stdout,
    drawn: Vec<Option<CellState>>,
}

impl Terminal {
    /// Create a new terminal handle. Nothing is drawn until [`init`](Self::init).
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            drawn: Vec::new(),
        }
    }

    /// Enter raw mode and the alternate screen, with mouse capture.
    pub fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        self.out.flush()?;
        self.drawn.clear();
        Ok(())
    }

    /// Draw the cells of `grid` whose state changed since the last flush.
    pub fn flush(&mut self, grid: &Grid) -> Result<(), Box<dyn std::error::Error>> {
        if self.drawn.len() != grid.len() {
            self.drawn = vec![None; grid.len()];
            queue!(self.out, terminal::Clear(ClearType::All))?;
        }

        let mut changed = 0;
        for (i, cell) in grid.iter().enumerate() {
            let state = cell.state();
            if self.drawn[i] == Some(state) {
                continue;
            }
            self.drawn[i] = Some(state);
            changed += 1;

            queue!(
                self.out,
                cursor::MoveTo(cell.col() as u16 * CELL_WIDTH, cell.row() as u16),
                SetBackgroundColor(state_color(state)),
                Print("  "),
            )?;
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        log::trace!("terminal: redrew {changed} cells");
        Ok(())
    }

    /// Replace the status line drawn below the grid.
    pub fn status(&mut self, rows: i32, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        queue!(
            self.out,
            cursor::MoveTo(0, rows.max(0) as u16 + 1),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(text),
            ResetColor,
        )?;
        self.out.flush()?;
        Ok(())
    }

    /// Restore the terminal.
    pub fn close(&mut self) {
        let _ = queue!(
            self.out,
            event::DisableMouseCapture,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}
