use std::io;
use std::time::Instant;

use anyhow::Context;
use crossterm::event;
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lifegrid::app;
use lifegrid::app::App;
use lifegrid::app::Flow;
use lifegrid::config::Config;
use lifegrid::simulation::Simulation;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env();
    info!(?config, "Starting");

    let sim = Simulation::new(config).context("Invalid configuration")?;
    let mut app = App::new(sim);

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();

    let res = app::enter_screen(&mut stdout)
        .context("Failed to set up the terminal")
        .and_then(|()| run(&mut app, &mut stdout));

    // Always give the terminal back, even if the loop failed
    let restored = app::restore_terminal(&mut stdout, terminal::disable_raw_mode)
        .context("Failed to restore the terminal");

    res.and(restored)
}

fn run(app: &mut App, stdout: &mut io::Stdout) -> anyhow::Result<()> {
    loop {
        app.draw(stdout).context("Failed to draw")?;

        // Sleep until either some input arrives or the next generation is due
        let event = if event::poll(app.timeout(Instant::now()))? {
            Some(event::read()?)
        } else {
            None
        };

        if let Flow::Exit = app.update(event, Instant::now()) {
            return Ok(());
        }
    }
}
