//! sazed - Code Snippet Organizer
//!
//! Keeps small code snippets in a directory tree (category → snippet →
//! code/tests/notes) and browses them in a three-column terminal navigator.
//! Subcommands edit the same store from the shell.

use crate::app::App;
use crate::cli::Cli;
use crate::config::Config;
use crate::ui::navigator::RenderConfig;
use clap::Parser;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::io::{self, Stdout};
use std::time::Duration;
use tracing::{error, info};

mod app;
mod cli;
mod config;
mod handlers;
mod logging;
mod models;
mod ui;

fn main() -> Result<(), Box<dyn Error>> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = Config::load()?;
    logging::init(&config.log_path(), cli.verbose)?;
    config.bootstrap()?;
    info!(root = %config.root().display(), filetype = config.filetype(), "starting");

    match cli.command {
        Some(command) => cli::execute(command, config.root())?,
        None => run_navigator(&config)?,
    }

    Ok(())
}

/// Runs the navigator until the user quits. The terminal is restored even
/// when the loop fails.
fn run_navigator(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut app = App::new(config.root())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "navigator stopped");
    }
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let render_config = RenderConfig::default();

    loop {
        terminal.draw(|frame| app.render(frame, &render_config))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if handlers::keys::handle_key_events(key, app) {
                    return Ok(());
                }
            }
        }
    }
}
