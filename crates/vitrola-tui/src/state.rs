//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── config: Config
//! │   ├── route: Route            (current path)
//! │   ├── auth: AuthState         (latest provider snapshot)
//! │   ├── toasts: ToastQueue
//! │   ├── task_seq / tasks        (async task lifecycle)
//! │   └── screen_scope            (cancels screen-scoped tasks on exit)
//! └── screen: Screen              (per-screen state, reset on entry)
//! ```
//!
//! Screen handlers get `&mut` to their screen state and to `TuiState` at the
//! same time, so they can raise toasts and allocate task ids.

use tokio_util::sync::CancellationToken;
use vitrola_core::auth::AuthState;
use vitrola_core::config::Config;

use crate::collection::CollectionState;
use crate::common::{TaskSeq, Tasks, ToastQueue};
use crate::effects::UiEffect;
use crate::home::HomeState;
use crate::login::{LoginState, SignupState};
use crate::routes::Route;
use crate::wallet::WalletState;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub screen: Screen,
}

impl AppState {
    /// Creates state for a start route. Auth starts in the loading state.
    pub fn new(config: Config, route: Route) -> Self {
        Self::with_auth(config, route, AuthState {
            is_loading: true,
            ..AuthState::default()
        })
    }

    pub fn with_auth(config: Config, route: Route, auth: AuthState) -> Self {
        let toasts = ToastQueue::new(config.notification_duration());
        Self {
            tui: TuiState {
                config,
                route,
                auth,
                toasts,
                task_seq: TaskSeq::default(),
                tasks: Tasks::default(),
                screen_scope: CancellationToken::new(),
                user_menu_open: false,
                spinner_frame: 0,
                should_quit: false,
            },
            screen: Screen::Pending,
        }
    }
}

/// Non-screen UI state shared by every screen.
pub struct TuiState {
    pub config: Config,
    pub route: Route,
    pub auth: AuthState,
    pub toasts: ToastQueue,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// Parent token for tasks owned by the current screen.
    pub screen_scope: CancellationToken,
    pub user_menu_open: bool,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl TuiState {
    /// Replaces the screen scope, returning an effect that cancels the old one.
    pub fn renew_screen_scope(&mut self) -> UiEffect {
        let old = std::mem::replace(&mut self.screen_scope, CancellationToken::new());
        self.tasks.clear_screen_scoped();
        UiEffect::CancelTask { token: Some(old) }
    }
}

/// Per-screen state.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Neutral placeholder while auth is loading.
    Pending,
    Landing,
    Login(LoginState),
    Signup(SignupState),
    Home(HomeState),
    Collection(CollectionState),
    Wallet(WalletState),
    NotFound,
}

/// How a screen handler wants the app to move on.
#[derive(Debug, PartialEq)]
pub enum ScreenTransition {
    Stay,
    Navigate(Route),
    Logout,
    Quit,
}

/// Result of a screen key handler.
#[derive(Debug)]
pub struct ScreenUpdate {
    pub transition: ScreenTransition,
    pub effects: Vec<UiEffect>,
}

impl ScreenUpdate {
    pub fn stay() -> Self {
        Self {
            transition: ScreenTransition::Stay,
            effects: Vec::new(),
        }
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            transition: ScreenTransition::Navigate(route),
            effects: Vec::new(),
        }
    }

    pub fn logout() -> Self {
        Self {
            transition: ScreenTransition::Logout,
            effects: Vec::new(),
        }
    }

    pub fn quit() -> Self {
        Self {
            transition: ScreenTransition::Quit,
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}
