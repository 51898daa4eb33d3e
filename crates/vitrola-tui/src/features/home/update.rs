//! Home screen reducer.

use crossterm::event::{KeyCode, KeyEvent};
use vitrola_core::purchase::build_sale;

use super::state::{HomeFocus, HomeState};
use crate::effects::UiEffect;
use crate::events::HomeUiEvent;
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

const EMPTY_SEARCH_MESSAGE: &str = "Type something to search";
const PURCHASE_SUCCESS_MESSAGE: &str = "Album purchased!";

/// Fresh home state plus the carousel fetch.
pub fn enter(tui: &mut TuiState) -> (HomeState, Vec<UiEffect>) {
    let state = HomeState {
        loading: true,
        ..HomeState::default()
    };
    let task = tui.task_seq.next_id();
    let query = tui.config.effective_default_search().to_string();
    (state, vec![UiEffect::FetchAlbums { task, query }])
}

/// True when keys should go to the search field instead of shortcuts.
pub fn captures_text(state: &HomeState) -> bool {
    !state.modal_visible && state.focus == HomeFocus::Search
}

pub fn handle_key(state: &mut HomeState, tui: &mut TuiState, key: KeyEvent) -> ScreenUpdate {
    if state.modal_visible {
        return handle_modal_key(state, tui, key);
    }

    match state.focus {
        HomeFocus::Search => match key.code {
            KeyCode::Esc | KeyCode::Tab => {
                state.focus = HomeFocus::Albums;
                ScreenUpdate::stay()
            }
            KeyCode::Enter => ScreenUpdate::stay().with_effects(submit_search(state, tui)),
            _ => {
                state.search_input.handle_key(&key);
                ScreenUpdate::stay()
            }
        },
        HomeFocus::Albums => match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => {
                state.move_cursor(-1);
                ScreenUpdate::stay()
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => {
                state.move_cursor(1);
                ScreenUpdate::stay()
            }
            KeyCode::Enter => {
                if let Some(album) = state.highlighted().cloned() {
                    state.open_modal(album);
                }
                ScreenUpdate::stay()
            }
            KeyCode::Char('/') | KeyCode::Tab => {
                state.focus = HomeFocus::Search;
                ScreenUpdate::stay()
            }
            KeyCode::Char('h') => ScreenUpdate::navigate(Route::Home),
            KeyCode::Char('c') => ScreenUpdate::navigate(Route::Collection),
            KeyCode::Char('w') => ScreenUpdate::navigate(Route::Wallet),
            KeyCode::Char('q') => ScreenUpdate::quit(),
            _ => ScreenUpdate::stay(),
        },
    }
}

fn handle_modal_key(state: &mut HomeState, tui: &mut TuiState, key: KeyEvent) -> ScreenUpdate {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.close_modal();
            let token = tui.tasks.modal_close.cancel.clone();
            tui.tasks.modal_close.clear();
            ScreenUpdate::stay().with_effects(vec![UiEffect::CancelTask { token }])
        }
        KeyCode::Enter | KeyCode::Char('b') => {
            ScreenUpdate::stay().with_effects(submit_purchase(state, tui))
        }
        _ => ScreenUpdate::stay(),
    }
}

/// Handles a search submission (button or Enter in the field).
///
/// Blank input is rejected with exactly one error toast and no state change.
pub fn submit_search(state: &mut HomeState, tui: &mut TuiState) -> Vec<UiEffect> {
    let term = state.search_input.trimmed().to_string();
    if term.is_empty() {
        tui.toasts.error(EMPTY_SEARCH_MESSAGE);
        return vec![];
    }

    state.begin_search(term.clone());
    state.focus = HomeFocus::Albums;

    let mut effects = Vec::new();
    if let Some(token) = tui.tasks.album_fetch.cancel.clone() {
        effects.push(UiEffect::CancelTask { token: Some(token) });
    }
    let task = tui.task_seq.next_id();
    effects.push(UiEffect::FetchAlbums { task, query: term });
    effects
}

/// Buys the selected album on behalf of the signed-in user.
pub fn submit_purchase(state: &mut HomeState, tui: &mut TuiState) -> Vec<UiEffect> {
    if state.purchase_pending {
        return vec![];
    }
    let Some(album) = state.selected_album.as_ref() else {
        return vec![];
    };

    match build_sale(album, &tui.auth.user, tui.config.purchase.send_password) {
        Ok(sale) => {
            state.purchase_pending = true;
            let task = tui.task_seq.next_id();
            vec![UiEffect::SubmitPurchase { task, sale }]
        }
        Err(err) => {
            tui.toasts.error(err.to_string());
            vec![]
        }
    }
}

pub fn handle_event(state: &mut HomeState, tui: &mut TuiState, event: HomeUiEvent) -> Vec<UiEffect> {
    match event {
        HomeUiEvent::AlbumsLoaded { result } => {
            state.loading = false;
            match result {
                Ok(albums) => {
                    state.albums = albums;
                    state.cursor = 0;
                }
                Err(message) => tui.toasts.error(message),
            }
            vec![]
        }
        HomeUiEvent::PurchaseFinished { album_id, result } => {
            finish_purchase(state, tui, &album_id, result)
        }
        HomeUiEvent::ModalCloseElapsed => {
            state.close_modal();
            vec![]
        }
    }
}

/// Applies a sale outcome. The modal only reacts when it still shows the purchased album.
fn finish_purchase(
    state: &mut HomeState,
    tui: &mut TuiState,
    album_id: &str,
    result: Result<(), String>,
) -> Vec<UiEffect> {
    let showing_album = state.modal_visible
        && state
            .selected_album
            .as_ref()
            .is_some_and(|album| album.id == album_id);

    match result {
        Ok(()) => {
            tui.toasts.success(PURCHASE_SUCCESS_MESSAGE);
            if !showing_album {
                return vec![];
            }
            let task = tui.task_seq.next_id();
            vec![UiEffect::ScheduleModalClose {
                task,
                delay: tui.config.purchase_close_delay(),
            }]
        }
        Err(message) => {
            if showing_album {
                state.purchase_pending = false;
            }
            tui.toasts.error(message);
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use vitrola_core::models::Album;

    use super::*;
    use crate::common::ToastKind;
    use crate::home::HomeMode;
    use crate::state::test_support::signed_in;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn album(id: &str) -> Album {
        Album {
            id: id.into(),
            name: format!("Album {id}"),
            value: 20.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_enter_fetches_default_carousel() {
        let mut app = signed_in(Route::Home);
        let (state, effects) = enter(&mut app.tui);
        assert!(state.loading);
        assert!(state.carousel_visible());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchAlbums { query, .. }] if query == "Red hot chilli peppers"
        ));
    }

    #[test]
    fn test_blank_search_shows_one_error_and_changes_nothing() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState::default();
        state.search_input.value = "   ".into();
        state.focus = HomeFocus::Search;
        let before = state.clone();

        let effects = submit_search(&mut state, &mut app.tui);

        assert!(effects.is_empty());
        assert_eq!(state, before);
        assert_eq!(app.tui.toasts.len(), 1);
        let toast = app.tui.toasts.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, EMPTY_SEARCH_MESSAGE);
    }

    #[test]
    fn test_search_switches_to_results_for_good() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState::default();
        state.search_input.value = " daft punk ".into();

        let effects = submit_search(&mut state, &mut app.tui);
        assert_eq!(
            state.mode,
            HomeMode::Searching {
                term: "daft punk".into()
            }
        );
        assert!(!state.carousel_visible());
        assert!(matches!(
            effects.last(),
            Some(UiEffect::FetchAlbums { query, .. }) if query == "daft punk"
        ));

        // A later blank submission keeps the results view.
        state.search_input.value.clear();
        assert!(submit_search(&mut state, &mut app.tui).is_empty());
        assert!(state.search_visible());
    }

    #[test]
    fn test_typing_in_search_does_not_trigger_shortcuts() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState {
            focus: HomeFocus::Search,
            ..Default::default()
        };
        let update = handle_key(&mut state, &mut app.tui, key(KeyCode::Char('q')));
        assert_eq!(update.transition, crate::state::ScreenTransition::Stay);
        assert_eq!(state.search_input.value, "q");
    }

    #[test]
    fn test_enter_opens_modal_for_highlighted_album() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState {
            albums: vec![album("a"), album("b")],
            ..Default::default()
        };
        handle_key(&mut state, &mut app.tui, key(KeyCode::Right));
        handle_key(&mut state, &mut app.tui, key(KeyCode::Enter));
        assert!(state.modal_visible);
        assert_eq!(state.selected_album.as_ref().unwrap().id, "b");
    }

    #[test]
    fn test_purchase_success_schedules_close() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState::default();
        state.open_modal(album("a"));

        let update = handle_key(&mut state, &mut app.tui, key(KeyCode::Enter));
        let [UiEffect::SubmitPurchase { sale, .. }] = update.effects.as_slice() else {
            panic!("expected a purchase effect");
        };
        assert_eq!(sale.id_spotify, "a");
        assert_eq!(sale.users.id, 7);
        assert_eq!(sale.users.password, None);
        assert!(state.purchase_pending);

        // Second press while pending does nothing.
        let again = handle_key(&mut state, &mut app.tui, key(KeyCode::Enter));
        assert!(again.effects.is_empty());

        let effects = handle_event(
            &mut state,
            &mut app.tui,
            HomeUiEvent::PurchaseFinished {
                album_id: "a".into(),
                result: Ok(()),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ScheduleModalClose { delay, .. }] if delay.as_millis() == 1000
        ));
        assert_eq!(app.tui.toasts.last().unwrap().kind, ToastKind::Success);
        assert!(state.modal_visible);

        handle_event(&mut state, &mut app.tui, HomeUiEvent::ModalCloseElapsed);
        assert!(!state.modal_visible);
        assert_eq!(state.selected_album.as_ref().unwrap().id, "a");
    }

    #[test]
    fn test_purchase_failure_keeps_modal_open() {
        let mut app = signed_in(Route::Home);
        let mut state = HomeState::default();
        state.open_modal(album("a"));
        state.purchase_pending = true;

        let effects = handle_event(
            &mut state,
            &mut app.tui,
            HomeUiEvent::PurchaseFinished {
                album_id: "a".into(),
                result: Err("Insufficient balance".into()),
            },
        );
        assert!(effects.is_empty());
        assert!(state.modal_visible);
        assert!(!state.purchase_pending);
        let toast = app.tui.toasts.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Insufficient balance");
    }

    #[test]
    fn test_send_password_option_includes_password() {
        let mut app = signed_in(Route::Home);
        app.tui.config.purchase.send_password = true;
        let mut state = HomeState::default();
        state.open_modal(album("a"));

        let effects = submit_purchase(&mut state, &mut app.tui);
        let [UiEffect::SubmitPurchase { sale, .. }] = effects.as_slice() else {
            panic!("expected a purchase effect");
        };
        assert_eq!(sale.users.password.as_deref(), Some("secret"));
    }
}
