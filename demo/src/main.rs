//! Terminal A* maze solver.
//!
//! Run: cargo run --bin maze -- --rows 30

mod config;
mod editor;

use std::fs::File;
use std::path::Path;
use std::thread;
use std::time::Duration;

use clap::Parser;
use env_logger::{Env, Target};

use maze_core::{CancelToken, Grid};
use maze_crossterm::{Interrupt, Terminal, input};

use crate::config::Config;
use crate::editor::{Editor, Flow};

fn init_logging(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

fn run(config: &Config, term: &mut Terminal) -> Result<(), Box<dyn std::error::Error>> {
    let rows = config.rows;
    let seed = config.seed.unwrap_or_else(rand::random);
    log::info!("maze: {rows}x{rows} grid, seed {seed}");

    let mut editor = Editor::new(rows, config.density, seed);
    let delay = Duration::from_millis(config.delay_ms);

    term.flush(editor.grid())?;
    term.status(rows, editor.status())?;

    loop {
        let Some(action) = input::next_action(Duration::from_millis(250), rows)? else {
            continue;
        };

        match editor.update(action) {
            Flow::Quit => return Ok(()),
            Flow::Continue => {}
            Flow::Solve => {
                log::debug!("maze: solving {:?}", editor.endpoints());
                let quit = CancelToken::new();
                let abort = CancelToken::new();
                let mut draw_err = None;

                let result = editor.solve(
                    |g: &Grid| {
                        if draw_err.is_none() {
                            if let Err(e) = term.flush(g) {
                                draw_err = Some(e);
                                abort.cancel();
                            }
                        }
                        if !delay.is_zero() {
                            thread::sleep(delay);
                        }
                    },
                    || {
                        match input::poll_interrupt() {
                            Ok(Some(Interrupt::Quit)) => {
                                quit.cancel();
                                abort.cancel();
                            }
                            Ok(Some(Interrupt::Abort)) => abort.cancel(),
                            Ok(None) => {}
                            Err(e) => {
                                log::warn!("maze: input error during search: {e}");
                                abort.cancel();
                            }
                        }
                        abort.is_cancelled()
                    },
                );
                log::debug!("maze: solve finished: {result:?}");

                if let Some(e) = draw_err {
                    return Err(e);
                }
                if quit.is_cancelled() {
                    return Ok(());
                }
            }
        }

        term.flush(editor.grid())?;
        term.status(rows, editor.status())?;
    }
}

fn main() {
    let config = Config::parse();
    if let Err(e) = init_logging(config.log_file.as_deref()) {
        eprintln!("Error: cannot set up logging: {e}");
        std::process::exit(1);
    }

    let mut term = Terminal::new();
    let result = term.init().and_then(|()| run(&config, &mut term));
    term.close();

    if let Err(e) = result {
        log::error!("maze: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
