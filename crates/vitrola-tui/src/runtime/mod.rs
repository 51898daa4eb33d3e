//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Handlers send `UiEvent`s to `inbox_tx`; the runtime drains `inbox_rx`
//! each frame. Auth state arrives separately through a `watch` receiver and
//! is turned into `UiEvent::AuthChanged` whenever it changes.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use vitrola_core::api::ApiClients;
use vitrola_core::auth::{AuthProvider, AuthState};
use vitrola_core::config::Config;
use vitrola_core::interrupt;
use vitrola_core::session::FileSessionStore;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::routes::Route;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Target frame rate while something is animating (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle. Longer timeout reduces CPU usage.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop, panic, or a second Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    auth: Arc<AuthProvider>,
    auth_rx: watch::Receiver<AuthState>,
    clients: ApiClients,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Builds the service clients and auth provider, then takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if a base URL is invalid or the terminal cannot be set up.
    pub fn new(config: Config, start: Route) -> Result<Self> {
        let clients = ApiClients::from_config(&config)?;
        let store = Arc::new(FileSessionStore::new());
        let auth = Arc::new(AuthProvider::new(store, clients.users.clone()));
        let auth_rx = auth.subscribe();

        // Set up panic hook BEFORE entering alternate screen
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(config, start);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            auth,
            auth_rx,
            clients,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be read or drawn.
    pub fn run(&mut self) -> Result<()> {
        let effects = update::start(&mut self.state);
        self.execute_effects(effects);

        // Rehydrate after the first screen exists so the guard sees the change.
        self.auth.initialize();

        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            if interrupt::is_interrupted() {
                self.state.tui.should_quit = true;
                break;
            }

            let events = self.collect_events()?;
            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.auth.is_loading
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        if self.auth_rx.has_changed().unwrap_or(false) {
            let snapshot = self.auth_rx.borrow_and_update().clone();
            events.push(UiEvent::AuthChanged(snapshot));
        }

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    ///
    /// Screen-scoped kinds get a child of the current screen token, so leaving
    /// the screen cancels them.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = kind
            .is_screen_scoped()
            .then(|| self.state.tui.screen_scope.child_token());
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::CancelTask { token } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }

            // Auth effects
            UiEffect::Login {
                task,
                email,
                password,
            } => {
                let provider = Arc::clone(&self.auth);
                self.spawn_task(TaskKind::Login, task, move |_| {
                    handlers::login(provider, email, password)
                });
            }
            UiEffect::Signup {
                task,
                name,
                email,
                password,
            } => {
                let users = self.clients.users.clone();
                self.spawn_task(TaskKind::Signup, task, move |cancel| {
                    handlers::signup(users, name, email, password, cancel)
                });
            }
            UiEffect::Logout => {
                if let Err(err) = self.auth.logout() {
                    tracing::warn!("logout could not clear the session: {err:#}");
                }
            }

            // Catalog effects
            UiEffect::FetchAlbums { task, query } => {
                let albums = self.clients.albums.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::AlbumFetch, task, move |cancel| {
                    handlers::fetch_albums(albums, creds, query, cancel)
                });
            }
            UiEffect::SubmitPurchase { task, sale } => {
                let albums = self.clients.albums.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::Purchase, task, move |cancel| {
                    handlers::submit_purchase(albums, creds, sale, cancel)
                });
            }
            UiEffect::ScheduleModalClose { task, delay } => {
                self.spawn_task(TaskKind::ModalClose, task, move |cancel| {
                    handlers::modal_close(delay, cancel)
                });
            }
            UiEffect::FetchCollection { task } => {
                let albums = self.clients.albums.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::CollectionFetch, task, move |cancel| {
                    handlers::fetch_collection(albums, creds, cancel)
                });
            }
            UiEffect::RemoveAlbum { task, id } => {
                let albums = self.clients.albums.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::CollectionRemove, task, move |cancel| {
                    handlers::remove_album(albums, creds, id, cancel)
                });
            }

            // Wallet effects
            UiEffect::FetchWallet { task } => {
                let users = self.clients.users.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::WalletFetch, task, move |cancel| {
                    handlers::fetch_wallet(users, creds, cancel)
                });
            }
            UiEffect::CreditWallet { task, value } => {
                let users = self.clients.users.clone();
                let creds = self.auth.credentials();
                self.spawn_task(TaskKind::WalletCredit, task, move |cancel| {
                    handlers::credit_wallet(users, creds, value, cancel)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
