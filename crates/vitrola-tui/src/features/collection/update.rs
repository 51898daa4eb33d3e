//! Collection screen reducer.

use crossterm::event::{KeyCode, KeyEvent};

use super::CollectionState;
use crate::effects::UiEffect;
use crate::events::CollectionUiEvent;
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

pub fn enter(tui: &mut TuiState) -> (CollectionState, Vec<UiEffect>) {
    let state = CollectionState {
        loading: true,
        ..CollectionState::default()
    };
    (state, vec![fetch(tui)])
}

fn fetch(tui: &mut TuiState) -> UiEffect {
    UiEffect::FetchCollection {
        task: tui.task_seq.next_id(),
    }
}

pub fn handle_key(state: &mut CollectionState, tui: &mut TuiState, key: KeyEvent) -> ScreenUpdate {
    if state.confirm_remove {
        state.confirm_remove = false;
        if key.code != KeyCode::Char('y') {
            return ScreenUpdate::stay();
        }
        let Some(album) = state.highlighted() else {
            return ScreenUpdate::stay();
        };
        if tui.tasks.collection_remove.is_running() {
            return ScreenUpdate::stay();
        }
        let effect = UiEffect::RemoveAlbum {
            task: tui.task_seq.next_id(),
            id: album.id,
        };
        return ScreenUpdate::stay().with_effects(vec![effect]);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.move_cursor(-1);
            ScreenUpdate::stay()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.move_cursor(1);
            ScreenUpdate::stay()
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            state.confirm_remove = state.highlighted().is_some();
            ScreenUpdate::stay()
        }
        KeyCode::Char('r') => {
            if tui.tasks.collection_fetch.is_running() {
                return ScreenUpdate::stay();
            }
            state.loading = true;
            ScreenUpdate::stay().with_effects(vec![fetch(tui)])
        }
        KeyCode::Char('h') | KeyCode::Esc => ScreenUpdate::navigate(Route::Home),
        KeyCode::Char('w') => ScreenUpdate::navigate(Route::Wallet),
        KeyCode::Char('q') => ScreenUpdate::quit(),
        _ => ScreenUpdate::stay(),
    }
}

pub fn handle_event(
    state: &mut CollectionState,
    tui: &mut TuiState,
    event: CollectionUiEvent,
) -> Vec<UiEffect> {
    match event {
        CollectionUiEvent::Loaded { result } => {
            state.loading = false;
            match result {
                Ok(albums) => state.set_albums(albums),
                Err(message) => tui.toasts.error(message),
            }
            vec![]
        }
        CollectionUiEvent::Removed { result } => match result {
            Ok(()) => {
                tui.toasts.success("Album removed from your collection");
                state.loading = true;
                vec![fetch(tui)]
            }
            Err(message) => {
                tui.toasts.error(message);
                vec![]
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use vitrola_core::models::CollectionAlbum;

    use super::*;
    use crate::common::ToastKind;
    use crate::state::test_support::signed_in;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn owned(id: i64, value: f64) -> CollectionAlbum {
        CollectionAlbum {
            id,
            name: format!("Album {id}"),
            value,
            ..Default::default()
        }
    }

    #[test]
    fn test_loaded_albums_are_summarized() {
        let mut app = signed_in(Route::Collection);
        let (mut state, effects) = enter(&mut app.tui);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchCollection { .. }]));

        handle_event(
            &mut state,
            &mut app.tui,
            CollectionUiEvent::Loaded {
                result: Ok(vec![owned(1, 10.5), owned(2, 4.25)]),
            },
        );
        assert!(!state.loading);
        let summary = state.summary();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.formatted_total(), "R$14.75");
    }

    #[test]
    fn test_remove_needs_confirmation() {
        let mut app = signed_in(Route::Collection);
        let mut state = CollectionState::default();
        state.set_albums(vec![owned(1, 1.0), owned(2, 2.0)]);
        handle_key(&mut state, &mut app.tui, key(KeyCode::Down));

        handle_key(&mut state, &mut app.tui, key(KeyCode::Char('d')));
        assert!(state.confirm_remove);
        let update = handle_key(&mut state, &mut app.tui, key(KeyCode::Char('n')));
        assert!(update.effects.is_empty());
        assert!(!state.confirm_remove);

        handle_key(&mut state, &mut app.tui, key(KeyCode::Char('d')));
        let update = handle_key(&mut state, &mut app.tui, key(KeyCode::Char('y')));
        assert!(matches!(
            update.effects.as_slice(),
            [UiEffect::RemoveAlbum { id: 2, .. }]
        ));
    }

    #[test]
    fn test_removed_refetches() {
        let mut app = signed_in(Route::Collection);
        let mut state = CollectionState::default();
        let effects = handle_event(
            &mut state,
            &mut app.tui,
            CollectionUiEvent::Removed { result: Ok(()) },
        );
        assert!(matches!(effects.as_slice(), [UiEffect::FetchCollection { .. }]));
        assert_eq!(app.tui.toasts.last().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_cursor_clamped_after_shrink() {
        let mut state = CollectionState::default();
        state.set_albums(vec![owned(1, 1.0), owned(2, 2.0)]);
        state.cursor = 1;
        state.set_albums(vec![owned(1, 1.0)]);
        assert_eq!(state.cursor, 0);
    }
}
