#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use chick_stack::app::{App, AppResult};
use chick_stack::config::{self, Config};
use chick_stack::leaderboard::FileScoreStore;
use chick_stack::ui;
use crossterm::event::{KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it
    let log_path = "chick_stack.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)?;

    let stderr_fd = std::io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Chick Stack");

    let mut config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration, using defaults: {e:?}");
            Config::default()
        }
    };

    // A name on the command line wins over the configured one
    let cli_player = std::env::args().nth(1);
    if let Some(name) = &cli_player {
        config.player.name.clone_from(name);
    }
    Config::install(config.clone());

    let store = FileScoreStore::from_config(config.leaderboard.path.as_deref());
    info!("Scores stored at {}", store.path().display());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let frame_interval = Duration::from_millis(config.display.frame_interval_ms.max(1));
    let app = App::new(&config, store);
    let res = run_app(&mut terminal, app, frame_interval, cli_player.as_deref());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
    }

    info!("Exiting");
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    frame_interval: Duration,
    cli_player: Option<&str>,
) -> AppResult<()> {
    let mut last_frame = Instant::now();

    // Drop anything typed before the game was on screen
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_frame.elapsed() >= frame_interval {
            last_frame = Instant::now();
            app.on_frame();
            terminal.draw(|f| ui::render(f, &app))?;
        }

        // Throttled internally to one file check every couple of seconds
        if Config::check_and_reload() {
            info!("Configuration changed, applying");
            let mut config = Config::current();
            if let Some(name) = cli_player {
                config.player.name = name.to_string();
            }
            app.apply_config(&config);
        }

        if app.should_quit {
            return Ok(());
        }

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) => {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Up => app.on_drop(),
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                    app.on_drop();
                }
            }
            _ => {}
        }
    }
}
