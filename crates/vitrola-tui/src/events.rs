//! UI event types.
//!
//! All external inputs (terminal, auth state changes, async results) are
//! converted to `UiEvent` before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`
//!
//! Screen-scoped tasks carry a child of the screen's cancellation token.
//! Leaving the screen cancels the parent, and results whose task id is no
//! longer active are dropped.

use crossterm::event::Event as CrosstermEvent;
use vitrola_core::auth::AuthState;
use vitrola_core::models::{Album, CollectionAlbum, Wallet};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

/// Result events from auth-related tasks.
#[derive(Debug)]
pub enum AuthUiEvent {
    LoginFinished { result: Result<(), String> },
    SignupFinished { result: Result<(), String> },
}

/// Result events from home-screen tasks.
#[derive(Debug)]
pub enum HomeUiEvent {
    AlbumsLoaded { result: Result<Vec<Album>, String> },
    /// `album_id` is the catalog id of the album the sale was for.
    PurchaseFinished {
        album_id: String,
        result: Result<(), String>,
    },
    ModalCloseElapsed,
}

/// Result events from collection-screen tasks.
#[derive(Debug)]
pub enum CollectionUiEvent {
    Loaded {
        result: Result<Vec<CollectionAlbum>, String>,
    },
    Removed {
        result: Result<(), String>,
    },
}

/// Result events from wallet-screen tasks.
#[derive(Debug)]
pub enum WalletUiEvent {
    Loaded { result: Result<Wallet, String> },
    Credited { result: Result<Wallet, String> },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick for spinners and toast expiry.
    Tick,

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// New auth state snapshot published by the provider.
    AuthChanged(AuthState),

    /// Async task spawned.
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Async task finished; `result` is the event it produced.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// A task observed its cancellation token.
    Cancelled,

    Auth(AuthUiEvent),
    Home(HomeUiEvent),
    Collection(CollectionUiEvent),
    Wallet(WalletUiEvent),
}
