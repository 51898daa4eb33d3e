//! Wallet screen reducer.

use crossterm::event::{KeyCode, KeyEvent};
use vitrola_core::models::parse_amount;

use super::WalletState;
use crate::effects::UiEffect;
use crate::events::WalletUiEvent;
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

pub fn enter(tui: &mut TuiState) -> (WalletState, Vec<UiEffect>) {
    let state = WalletState {
        loading: true,
        ..WalletState::default()
    };
    let task = tui.task_seq.next_id();
    (state, vec![UiEffect::FetchWallet { task }])
}

pub fn captures_text(state: &WalletState) -> bool {
    state.editing
}

pub fn handle_key(state: &mut WalletState, tui: &mut TuiState, key: KeyEvent) -> ScreenUpdate {
    if state.editing {
        return match key.code {
            KeyCode::Esc => {
                state.editing = false;
                ScreenUpdate::stay()
            }
            KeyCode::Enter => ScreenUpdate::stay().with_effects(submit_credit(state, tui)),
            _ => {
                state.credit_input.handle_key(&key);
                ScreenUpdate::stay()
            }
        };
    }

    match key.code {
        KeyCode::Char('a') => {
            state.editing = true;
            ScreenUpdate::stay()
        }
        KeyCode::Char('r') => {
            if tui.tasks.wallet_fetch.is_running() {
                return ScreenUpdate::stay();
            }
            state.loading = true;
            let task = tui.task_seq.next_id();
            ScreenUpdate::stay().with_effects(vec![UiEffect::FetchWallet { task }])
        }
        KeyCode::Char('h') | KeyCode::Esc => ScreenUpdate::navigate(Route::Home),
        KeyCode::Char('c') => ScreenUpdate::navigate(Route::Collection),
        KeyCode::Char('q') => ScreenUpdate::quit(),
        _ => ScreenUpdate::stay(),
    }
}

fn submit_credit(state: &mut WalletState, tui: &mut TuiState) -> Vec<UiEffect> {
    if tui.tasks.wallet_credit.is_running() {
        return vec![];
    }
    let Some(value) = parse_amount(&state.credit_input.value) else {
        tui.toasts.error("Enter a positive amount");
        return vec![];
    };
    state.editing = false;
    let task = tui.task_seq.next_id();
    vec![UiEffect::CreditWallet { task, value }]
}

pub fn handle_event(state: &mut WalletState, tui: &mut TuiState, event: WalletUiEvent) {
    match event {
        WalletUiEvent::Loaded { result } => {
            state.loading = false;
            match result {
                Ok(wallet) => state.wallet = Some(wallet),
                Err(message) => tui.toasts.error(message),
            }
        }
        WalletUiEvent::Credited { result } => match result {
            Ok(wallet) => {
                state.wallet = Some(wallet);
                state.credit_input.value.clear();
                tui.toasts.success("Credit added to your wallet");
            }
            Err(message) => tui.toasts.error(message),
        },
    }
}
