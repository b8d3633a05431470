//! headline-reader: newsapi.org headlines in the terminal, with offline
//! bookmarks.
//!
//! ## Architecture overview
//!
//! ```text
//!                     watch (article list)
//! ┌──────────┐  ◄─────────────────────────  ┌──────────┐      ┌─────────────┐
//! │  app.rs  │                              │ state.rs │ ───► │repository.rs│
//! │ (state)  │  ─────── Command ──────────► │ (tasks)  │      └──────┬──────┘
//! └──────────┘  ◄──── UiMsg (channel) ───── └──────────┘        ┌────┴────┐
//!    ▲     │                                                    ▼         ▼
//!    │     │ draw()                                         source/    store/
//!    │     ▼                                                (HTTP)    (SQLite)
//! input.rs  ui.rs
//! ```
//!
//! * **`source/`**: the `NewsSource` trait, the article types and the
//!   newsapi.org client.
//! * **`store/`**: the saved-article table (SQLite).
//! * **`repository`**: joins the two and maps articles to rows and back.
//! * **`state`**: the observable article list; spawns every operation on the
//!   tokio runtime.
//! * **`app`**: UI-side state (tabs, selection, bookmarks, search query).
//! * **`ui`**: pure rendering: reads `App` state and draws widgets.
//! * **`input`**: maps key events to `App` mutations and commands.
//! * **`main`**: wires everything together: parse config, set up logging,
//!   the runtime and the terminal, and run the event loop.

mod app;
mod config;
mod error;
mod input;
mod logging;
mod repository;
mod source;
mod state;
mod store;
mod ui;

#[cfg(test)]
mod test_support;

use std::io;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use app::{App, Command, UiMsg};
use config::Config;
use repository::NewsRepository;
use source::{Article, NewsApiClient};
use state::{NewsState, NewsType};
use store::SqliteStore;

// ---------------------------------------------------------------------------
// Terminal guard
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Hand a UI command to the state holder.
///
/// Bookmark writes return the task that settles them (see [`settle`]).
fn dispatch(
    state: &NewsState,
    runtime: &Handle,
    app: &App,
    country: &str,
    tx: &mpsc::Sender<UiMsg>,
    cmd: Command,
) -> Option<JoinHandle<()>> {
    match cmd {
        Command::Load { mode, query } => {
            state.load(mode, query, country);
            None
        }
        Command::Save(article) => {
            let write = state.save(article.clone());
            Some(settle(state, runtime, write, article, tx, None))
        }
        Command::Delete(article) => {
            let write = state.delete_saved(article.url.clone());
            // The state holder never refreshes after a delete; the Saved tab
            // has to reload once the row is gone.
            let reload = (app.mode == NewsType::Saved).then(|| country.to_owned());
            Some(settle(state, runtime, write, article, tx, reload))
        }
    }
}

/// Wait for a bookmark write, optionally reload the Saved tab, then report
/// what the store holds for the article as [`UiMsg::Settled`].
fn settle(
    state: &NewsState,
    runtime: &Handle,
    write: JoinHandle<()>,
    article: Article,
    tx: &mpsc::Sender<UiMsg>,
    reload_saved: Option<String>,
) -> JoinHandle<()> {
    let state = state.clone();
    let tx = tx.clone();
    runtime.spawn(async move {
        if let Err(e) = write.await {
            warn!(url = %article.url, error = %e, "bookmark write did not finish");
        }
        if let Some(country) = reload_saved {
            state.load(NewsType::Saved, None, &country);
        }
        let url = article.url.clone();
        let check = state.check_saved(&article, move |saved| {
            let _ = tx.send(UiMsg::Settled { url, saved });
        });
        let _ = check.await;
    })
}

/// Ask the store about every visible article; answers come back as
/// [`UiMsg::Bookmark`].
fn check_bookmarks(state: &NewsState, app: &App, tx: &mpsc::Sender<UiMsg>) {
    for article in app.visible_articles() {
        let tx = tx.clone();
        let url = article.url.clone();
        state.check_saved(article, move |saved| {
            let _ = tx.send(UiMsg::Bookmark { url, saved });
        });
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::parse();

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log directory {}", config.log_dir.display()))?;
    logging::configure_logging(&config.log_dir);
    install_panic_hook();

    // -- wire the data layer -------------------------------------------------
    let runtime = Runtime::new().context("failed to start async runtime")?;
    let store = runtime
        .block_on(SqliteStore::open(&config.database))
        .with_context(|| format!("failed to open {}", config.database.display()))?;
    let client = NewsApiClient::new(&config.base_url, config.api_key.clone())?;
    let repository = NewsRepository::new(Arc::new(client), Arc::new(store));
    let state = NewsState::new(repository, runtime.handle().clone());
    info!(country = %config.country, "starting");

    let mut news = state.subscribe();
    let (tx, rx) = mpsc::channel();

    // -- terminal setup (Drop restores on exit or panic) -------------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();
    let initial = app.reload();
    dispatch(&state, runtime.handle(), &app, &config.country, &tx, initial);

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Pick up a replaced article list and re-check its bookmarks.
    //   2. Drain bookmark answers and settled writes.
    //   3. Render the UI.
    //   4. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        // 1. New list
        if news.has_changed().unwrap_or(false) {
            let articles = news.borrow_and_update().clone();
            app.set_articles(articles);
            check_bookmarks(&state, &app, &tx);
        }

        // 2. Bookmark answers
        while let Ok(msg) = rx.try_recv() {
            app.apply(msg);
        }

        // 3. Render
        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        // 4. Handle input
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if let Some(cmd) = input::handle_key_event(&mut app, key) {
                    dispatch(&state, runtime.handle(), &app, &config.country, &tx, cmd);
                }
            }
        }

        if app.quit {
            break;
        }
    }

    info!("shutting down");
    // `guard` is dropped here, restoring the terminal; in-flight tasks are
    // dropped with the runtime.
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
