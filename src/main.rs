//! BLOCKFALL - falling blocks in the terminal

use blockfall::clock::SystemClock;
use blockfall::game::{Action, Game, GameEvent};
use blockfall::input::InputHandler;
use blockfall::randomizer::UniformRandomizer;
use blockfall::settings::Settings;
use blockfall::ui;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::Duration,
};
use tracing_subscriber::EnvFilter;

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Generate session ID for this instance
    let session_id: u32 = rand::random();

    // The terminal is in raw mode while playing, so logs go to a file
    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blockfall=debug")),
        )
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();
    let randomizer = match settings.gameplay.seed {
        Some(seed) => UniformRandomizer::with_seed(seed),
        None => UniformRandomizer::new(),
    };
    // Put `seed` under [gameplay] in settings.toml to replay this piece sequence
    tracing::info!(
        seed = randomizer.seed(),
        fixed = settings.gameplay.seed.is_some(),
        "Piece sequence seeded"
    );
    let mut game = Game::with_parts(Box::new(randomizer), Box::new(SystemClock));

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut game, &settings);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    // Write the file back so new options show up for editing
    if let Err(e) = settings.save() {
        tracing::warn!("Could not save settings: {}", e);
    }

    if result.is_ok() {
        println!("\nThanks for playing BLOCKFALL!");
        println!("Final Score: {}", game.score());
        println!("Level: {} | Lines: {}", game.level(), game.lines());
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    game: &mut Game,
    settings: &Settings,
) -> io::Result<()> {
    let input = InputHandler::from_settings(settings);

    loop {
        let snapshot = game.snapshot();
        terminal.draw(|frame| ui::render_game(frame, &snapshot, settings))?;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match input.key_down(key) {
                        Some(Action::Quit) => break,
                        Some(action) => game.process_action(action),
                        None => {}
                    }
                }
            }
        }

        game.tick();

        for event in game.drain_events() {
            match event {
                GameEvent::GameOver { score } => {
                    tracing::info!("Final score {}", score);
                }
                other => tracing::trace!(?other, "Game event"),
            }
        }
    }

    tracing::info!("Quit");
    Ok(())
}
