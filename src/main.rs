//! Deblur TUI - Terminal Image Deblurring Client
//!
//! Lets the user pick an image, upload it to a remote deblurring
//! service and download the enhanced result, with browser-style page
//! navigation between a welcome, upload and about page.

use std::io;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event, KeyCode, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};

mod domain;
mod application;
mod infrastructure;
mod presentation;

use application::{App, AppMode, Command, DEFAULT_SERVER};
use domain::Navigator;
use infrastructure::{
    ClipboardService, Session, SessionRepository, UploadClient, UploadOutcome, SESSION_FILE,
};
use presentation::{drop_zone_rect, render_ui, InputHandler};

/// Entry point for the deblurring client.
///
/// Resolves the server base URL (argument, then environment, then the
/// default), restores the page from the previous session, sets up the
/// terminal and runs the event loop until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues
/// with the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let server = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("DEBLUR_SERVER").ok())
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let saved = SessionRepository::load(SESSION_FILE).ok();
    let navigator = Navigator::new(saved.as_ref().map(|s| s.page.as_str()));
    let mut app = App::new(navigator, server.clone());
    let uploader = UploadClient::new(&server);

    let res = run_app(&mut terminal, &mut app, &uploader);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    let session = Session {
        page: app.navigator.current().as_str().to_string(),
    };
    if let Err(err) = SessionRepository::save(&session, SESSION_FILE) {
        eprintln!("Could not save session: {err}");
    }

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Main application event loop.
///
/// One cooperative loop drives everything: it renders, applies upload
/// completions arriving from the worker thread, executes the commands
/// the controllers queued, and then waits briefly for terminal input.
/// The network upload is the only operation that runs off-loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    uploader: &UploadClient,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel::<UploadOutcome>();

    loop {
        terminal.draw(|f| render_ui(f, app))?;

        while let Ok(outcome) = rx.try_recv() {
            app.finish_upload(outcome.token, outcome.result);
        }

        for command in app.drain_commands() {
            match command {
                Command::Upload { file, token } => {
                    uploader.spawn_upload(file, token, tx.clone());
                }
                Command::SaveResult { locator, filename } => {
                    match uploader.save_result(&locator, &filename) {
                        Ok(path) => app.set_status(format!("Saved {}", path)),
                        Err(err) => app.set_status(err),
                    }
                }
                Command::CopyResult(locator) => match ClipboardService::copy(&locator) {
                    Ok(_) => app.set_status("Result URL copied".to_string()),
                    Err(err) => app.set_status(format!("Clipboard error: {}", err)),
                },
            }
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if matches!(app.mode, AppMode::Normal) => return Ok(()),
                _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
            },
            Event::Paste(text) => InputHandler::handle_paste(app, &text),
            Event::Mouse(mouse) => {
                let size = terminal.size()?;
                let area = Rect::new(0, 0, size.width, size.height);
                InputHandler::handle_mouse(app, mouse, drop_zone_rect(area, app));
            }
            _ => {}
        }
    }
}
