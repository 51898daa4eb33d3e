//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Navigation always goes through [`navigate`]: it cancels the tasks of the
//! screen being left, then builds fresh state for the new route. Protected
//! routes consult the auth guard on entry and again on every auth change.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use vitrola_core::auth::{AuthState, GuardDecision, route_guard};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::routes::Route;
use crate::state::{AppState, Screen, ScreenTransition, ScreenUpdate};
use crate::{collection, home, landing, login, not_found, wallet};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.toasts.prune(Instant::now());
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::AuthChanged(auth) => handle_auth_changed(app, auth),
        UiEvent::TaskStarted { kind, started } => {
            // The screen that asked for it is already gone.
            if started.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                return vec![];
            }
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                vec![]
            }
        }
        UiEvent::Cancelled => vec![],
        UiEvent::Auth(event) => {
            let screen_update = login::handle_event(&mut app.tui, event);
            apply_screen_update(app, screen_update)
        }
        UiEvent::Home(event) => match &mut app.screen {
            Screen::Home(state) => home::handle_event(state, &mut app.tui, event),
            _ => vec![],
        },
        UiEvent::Collection(event) => match &mut app.screen {
            Screen::Collection(state) => collection::handle_event(state, &mut app.tui, event),
            _ => vec![],
        },
        UiEvent::Wallet(event) => {
            if let Screen::Wallet(state) = &mut app.screen {
                wallet::handle_event(state, &mut app.tui, event);
            }
            vec![]
        }
    }
}

/// Builds the first screen for the start route.
pub fn start(app: &mut AppState) -> Vec<UiEffect> {
    enter_route(app)
}

/// Leaves the current screen and enters `route`.
pub fn navigate(app: &mut AppState, route: Route) -> Vec<UiEffect> {
    tracing::debug!(from = %app.tui.route, to = %route, "navigate");
    app.tui.user_menu_open = false;
    let mut effects = vec![app.tui.renew_screen_scope()];
    app.tui.route = route;
    effects.extend(enter_route(app));
    effects
}

/// Builds fresh state for the current route, applying the auth guard.
fn enter_route(app: &mut AppState) -> Vec<UiEffect> {
    if app.tui.route.is_protected() {
        match route_guard(&app.tui.auth) {
            GuardDecision::Pending => {
                app.screen = Screen::Pending;
                return vec![];
            }
            GuardDecision::RedirectToLogin => return navigate(app, Route::Login),
            GuardDecision::Render => {}
        }
    }

    let (screen, effects) = match &app.tui.route {
        Route::Landing => (Screen::Landing, vec![]),
        Route::Login => (Screen::Login(login::enter_login()), vec![]),
        Route::Signup => (Screen::Signup(login::enter_signup()), vec![]),
        Route::Home => {
            let (state, effects) = home::enter(&mut app.tui);
            (Screen::Home(state), effects)
        }
        Route::Collection => {
            let (state, effects) = collection::enter(&mut app.tui);
            (Screen::Collection(state), effects)
        }
        Route::Wallet => {
            let (state, effects) = wallet::enter(&mut app.tui);
            (Screen::Wallet(state), effects)
        }
        Route::NotFound(_) => (Screen::NotFound, vec![]),
    };
    app.screen = screen;
    effects
}

fn handle_auth_changed(app: &mut AppState, auth: AuthState) -> Vec<UiEffect> {
    let was_authenticated = app.tui.auth.is_authenticated;
    let signed_in = auth.is_authenticated;
    let decision = route_guard(&auth);
    app.tui.auth = auth;

    if matches!(app.screen, Screen::Pending) && decision != GuardDecision::Pending {
        return enter_route(app);
    }
    if app.tui.route.is_protected() && decision == GuardDecision::RedirectToLogin {
        return navigate(app, Route::Login);
    }
    if app.tui.route == Route::Login && signed_in && !was_authenticated {
        return navigate(app, Route::Home);
    }
    vec![]
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return apply_screen_update(app, ScreenUpdate::quit());
    }

    if app.tui.user_menu_open {
        let screen_update = match key.code {
            KeyCode::Char('l') => ScreenUpdate::logout(),
            KeyCode::Char('c') => ScreenUpdate::navigate(Route::Collection),
            KeyCode::Char('w') => ScreenUpdate::navigate(Route::Wallet),
            _ => {
                app.tui.user_menu_open = false;
                ScreenUpdate::stay()
            }
        };
        return apply_screen_update(app, screen_update);
    }

    if key.code == KeyCode::Char('u') && user_menu_available(app) {
        app.tui.user_menu_open = true;
        return vec![];
    }

    let screen_update = match &mut app.screen {
        Screen::Pending => match key.code {
            KeyCode::Char('q') => ScreenUpdate::quit(),
            _ => ScreenUpdate::stay(),
        },
        Screen::Landing => landing::handle_key(&app.tui, key),
        Screen::Login(state) => login::handle_login_key(state, &mut app.tui, key),
        Screen::Signup(state) => login::handle_signup_key(state, &mut app.tui, key),
        Screen::Home(state) => home::handle_key(state, &mut app.tui, key),
        Screen::Collection(state) => collection::handle_key(state, &mut app.tui, key),
        Screen::Wallet(state) => wallet::handle_key(state, &mut app.tui, key),
        Screen::NotFound => not_found::handle_key(&app.tui, key),
    };
    apply_screen_update(app, screen_update)
}

/// The user menu lives in the header of signed-in screens, unless a text
/// field has the keyboard.
fn user_menu_available(app: &AppState) -> bool {
    if !app.tui.auth.is_authenticated {
        return false;
    }
    match &app.screen {
        Screen::Home(state) => !home::captures_text(state) && !state.modal_visible,
        Screen::Wallet(state) => !wallet::captures_text(state),
        Screen::Collection(state) => !state.confirm_remove,
        Screen::NotFound => true,
        _ => false,
    }
}

fn apply_screen_update(app: &mut AppState, screen_update: ScreenUpdate) -> Vec<UiEffect> {
    let mut effects = screen_update.effects;
    match screen_update.transition {
        ScreenTransition::Stay => {}
        ScreenTransition::Navigate(route) => effects.extend(navigate(app, route)),
        ScreenTransition::Logout => {
            app.tui.auth = AuthState::default();
            effects.push(UiEffect::Logout);
            effects.extend(navigate(app, Route::Login));
        }
        ScreenTransition::Quit => effects.push(UiEffect::Quit),
    }
    effects
}

#[cfg(test)]
mod tests {
    use vitrola_core::config::Config;
    use vitrola_core::models::Album;

    use super::*;
    use crate::common::{TaskCompleted, TaskKind, TaskStarted};
    use crate::events::HomeUiEvent;
    use crate::state::test_support::{signed_in, signed_out, user};

    fn press(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Executes the cancellations a runtime would.
    fn cancel_all(effects: &[UiEffect]) {
        for effect in effects {
            if let UiEffect::CancelTask { token: Some(token) } = effect {
                token.cancel();
            }
        }
    }

    fn start_task(app: &mut AppState, kind: TaskKind, effects: &[UiEffect]) -> TaskStarted {
        let task = effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::FetchAlbums { task, .. }
                | UiEffect::FetchCollection { task }
                | UiEffect::FetchWallet { task }
                | UiEffect::SubmitPurchase { task, .. } => Some(*task),
                _ => None,
            })
            .expect("a task effect");
        let started = TaskStarted {
            id: task,
            cancel: Some(app.tui.screen_scope.child_token()),
        };
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: started.clone(),
            },
        );
        started
    }

    fn albums_loaded(id: crate::common::TaskId, names: &[&str]) -> UiEvent {
        let albums = names
            .iter()
            .map(|name| Album {
                id: (*name).into(),
                name: (*name).into(),
                ..Default::default()
            })
            .collect();
        UiEvent::TaskCompleted {
            kind: TaskKind::AlbumFetch,
            completed: TaskCompleted {
                id,
                result: Box::new(UiEvent::Home(HomeUiEvent::AlbumsLoaded {
                    result: Ok(albums),
                })),
            },
        }
    }

    #[test]
    fn test_protected_route_waits_while_loading() {
        let mut app = AppState::new(Config::default(), Route::Home);
        let effects = start(&mut app);
        assert!(effects.is_empty());
        assert!(matches!(app.screen, Screen::Pending));
        assert_eq!(app.tui.route, Route::Home);
    }

    #[test]
    fn test_pending_renders_once_authenticated() {
        let mut app = AppState::new(Config::default(), Route::Home);
        start(&mut app);

        let effects = update(
            &mut app,
            UiEvent::AuthChanged(AuthState {
                is_authenticated: true,
                is_loading: false,
                user: user(),
            }),
        );
        assert!(matches!(app.screen, Screen::Home(_)));
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchAlbums { .. }))
        );
    }

    #[test]
    fn test_pending_redirects_when_signed_out() {
        let mut app = AppState::new(Config::default(), Route::Collection);
        start(&mut app);

        update(&mut app, UiEvent::AuthChanged(AuthState::default()));
        assert_eq!(app.tui.route, Route::Login);
        assert!(matches!(app.screen, Screen::Login(_)));
    }

    #[test]
    fn test_signed_out_protected_route_redirects_immediately() {
        let mut app = signed_out(Route::Wallet);
        let effects = start(&mut app);
        assert_eq!(app.tui.route, Route::Login);
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, UiEffect::FetchWallet { .. }))
        );
    }

    #[test]
    fn test_unknown_route_renders_not_found() {
        let mut app = signed_out(Route::parse("/does-not-exist"));
        start(&mut app);
        assert!(matches!(app.screen, Screen::NotFound));
    }

    #[test]
    fn test_results_for_left_screen_are_discarded() {
        let mut app = signed_in(Route::Home);
        let effects = start(&mut app);
        let started = start_task(&mut app, TaskKind::AlbumFetch, &effects);

        let effects = update(&mut app, press(KeyCode::Char('c')));
        cancel_all(&effects);
        assert_eq!(app.tui.route, Route::Collection);
        assert!(started.cancel.as_ref().unwrap().is_cancelled());

        update(&mut app, albums_loaded(started.id, &["late"]));
        assert!(matches!(app.screen, Screen::Collection(_)));
    }

    #[test]
    fn test_superseded_fetch_result_is_ignored() {
        let mut app = signed_in(Route::Home);
        let effects = start(&mut app);
        let first = start_task(&mut app, TaskKind::AlbumFetch, &effects);

        if let Screen::Home(state) = &mut app.screen {
            state.search_input.value = "beatles".into();
            state.focus = home::HomeFocus::Search;
        }
        let effects = update(&mut app, press(KeyCode::Enter));
        let second = start_task(&mut app, TaskKind::AlbumFetch, &effects);

        update(&mut app, albums_loaded(first.id, &["carousel"]));
        let Screen::Home(state) = &app.screen else {
            panic!("expected home");
        };
        assert!(state.albums.is_empty());
        assert!(state.loading);

        update(&mut app, albums_loaded(second.id, &["Abbey Road"]));
        let Screen::Home(state) = &app.screen else {
            panic!("expected home");
        };
        assert_eq!(state.albums.len(), 1);
        assert!(state.search_visible());
    }

    #[test]
    fn test_started_event_for_cancelled_scope_is_ignored() {
        let mut app = signed_in(Route::Home);
        let effects = start(&mut app);
        let token = app.tui.screen_scope.child_token();
        cancel_all(&navigate(&mut app, Route::Wallet));

        let task = match &effects[0] {
            UiEffect::FetchAlbums { task, .. } => *task,
            other => panic!("unexpected effect {other:?}"),
        };
        update(
            &mut app,
            UiEvent::TaskStarted {
                kind: TaskKind::AlbumFetch,
                started: TaskStarted {
                    id: task,
                    cancel: Some(token),
                },
            },
        );
        assert!(!app.tui.tasks.album_fetch.is_running());
    }

    #[test]
    fn test_logout_from_user_menu() {
        let mut app = signed_in(Route::Home);
        start(&mut app);

        update(&mut app, press(KeyCode::Char('u')));
        assert!(app.tui.user_menu_open);
        let effects = update(&mut app, press(KeyCode::Char('l')));

        assert!(effects.iter().any(|e| matches!(e, UiEffect::Logout)));
        assert_eq!(app.tui.route, Route::Login);
        assert!(!app.tui.auth.is_authenticated);
        assert!(!app.tui.user_menu_open);
    }

    #[test]
    fn test_session_loss_redirects_protected_screen() {
        let mut app = signed_in(Route::Collection);
        start(&mut app);
        update(&mut app, UiEvent::AuthChanged(AuthState::default()));
        assert_eq!(app.tui.route, Route::Login);
    }

    #[test]
    fn test_login_screen_moves_home_on_sign_in() {
        let mut app = signed_out(Route::Login);
        start(&mut app);
        update(
            &mut app,
            UiEvent::AuthChanged(AuthState {
                is_authenticated: true,
                is_loading: false,
                user: user(),
            }),
        );
        assert_eq!(app.tui.route, Route::Home);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = signed_out(Route::Landing);
        start(&mut app);
        let effects = update(
            &mut app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            ))),
        );
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_stale_purchase_leaves_other_album_modal_open() {
        let mut app = signed_in(Route::Home);
        let effects = start(&mut app);
        let fetch = start_task(&mut app, TaskKind::AlbumFetch, &effects);
        update(&mut app, albums_loaded(fetch.id, &["a", "b"]));

        // Buy "a", then close its modal before the sale answers.
        update(&mut app, press(KeyCode::Enter));
        let effects = update(&mut app, press(KeyCode::Enter));
        let purchase = start_task(&mut app, TaskKind::Purchase, &effects);
        cancel_all(&update(&mut app, press(KeyCode::Esc)));

        update(&mut app, press(KeyCode::Right));
        update(&mut app, press(KeyCode::Enter));

        let effects = update(
            &mut app,
            UiEvent::TaskCompleted {
                kind: TaskKind::Purchase,
                completed: TaskCompleted {
                    id: purchase.id,
                    result: Box::new(UiEvent::Home(HomeUiEvent::PurchaseFinished {
                        album_id: "a".into(),
                        result: Ok(()),
                    })),
                },
            },
        );
        assert!(
            !effects
                .iter()
                .any(|e| matches!(e, UiEffect::ScheduleModalClose { .. }))
        );

        let Screen::Home(state) = &app.screen else {
            panic!("expected the home screen");
        };
        assert!(state.modal_visible);
        assert_eq!(state.selected_album.as_ref().unwrap().id, "b");
        assert_eq!(
            app.tui.toasts.last().unwrap().kind,
            crate::common::ToastKind::Success
        );
    }
}
