//! Login and signup reducers.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{EMAIL, LoginState, NAME, PASSWORD, SIGNUP_EMAIL, SIGNUP_PASSWORD, SignupState};
use crate::common::Form;
use crate::effects::UiEffect;
use crate::events::AuthUiEvent;
use crate::routes::Route;
use crate::state::{ScreenUpdate, TuiState};

const SIGNUP_SUCCESS_MESSAGE: &str = "Account created! You can sign in now.";

pub fn enter_login() -> LoginState {
    LoginState::default()
}

pub fn enter_signup() -> SignupState {
    SignupState::default()
}

/// The login form is hidden while auth is loading or a user is signed in.
pub fn login_form_visible(tui: &TuiState) -> bool {
    !tui.auth.is_loading && !tui.auth.is_authenticated
}

pub fn handle_login_key(state: &mut LoginState, tui: &mut TuiState, key: KeyEvent) -> ScreenUpdate {
    if key.code == KeyCode::Esc {
        return ScreenUpdate::navigate(Route::Landing);
    }
    if !login_form_visible(tui) || tui.tasks.login.is_running() {
        return ScreenUpdate::stay();
    }
    if is_ctrl(&key, 'n') {
        return ScreenUpdate::navigate(Route::Signup);
    }

    match key.code {
        KeyCode::Enter => ScreenUpdate::stay().with_effects(submit_login(state, tui)),
        _ => {
            edit_form(&mut state.form, &key);
            ScreenUpdate::stay()
        }
    }
}

pub fn handle_signup_key(
    state: &mut SignupState,
    tui: &mut TuiState,
    key: KeyEvent,
) -> ScreenUpdate {
    if key.code == KeyCode::Esc {
        return ScreenUpdate::navigate(Route::Landing);
    }
    if tui.tasks.signup.is_running() {
        return ScreenUpdate::stay();
    }
    if is_ctrl(&key, 'l') {
        return ScreenUpdate::navigate(Route::Login);
    }

    match key.code {
        KeyCode::Enter => ScreenUpdate::stay().with_effects(submit_signup(state, tui)),
        _ => {
            edit_form(&mut state.form, &key);
            ScreenUpdate::stay()
        }
    }
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

fn edit_form(form: &mut Form, key: &KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        _ => {
            if let Some(field) = form.focused_mut() {
                field.handle_key(key);
            }
        }
    }
}

/// Rejects the form with a toast if any field is blank.
fn require_all(form: &Form, tui: &mut TuiState) -> bool {
    match form.first_blank() {
        Some(label) => {
            tui.toasts.error(format!("{label} is required"));
            false
        }
        None => true,
    }
}

fn submit_login(state: &LoginState, tui: &mut TuiState) -> Vec<UiEffect> {
    if !require_all(&state.form, tui) {
        return vec![];
    }
    let task = tui.task_seq.next_id();
    vec![UiEffect::Login {
        task,
        email: state.form.value(EMAIL).to_string(),
        password: state.form.value(PASSWORD).to_string(),
    }]
}

fn submit_signup(state: &SignupState, tui: &mut TuiState) -> Vec<UiEffect> {
    if !require_all(&state.form, tui) {
        return vec![];
    }
    let task = tui.task_seq.next_id();
    vec![UiEffect::Signup {
        task,
        name: state.form.value(NAME).to_string(),
        email: state.form.value(SIGNUP_EMAIL).to_string(),
        password: state.form.value(SIGNUP_PASSWORD).to_string(),
    }]
}

/// Login results arrive even if the user has moved on; navigation only
/// happens when they are still on the screen that asked.
pub fn handle_event(tui: &mut TuiState, event: AuthUiEvent) -> ScreenUpdate {
    match event {
        AuthUiEvent::LoginFinished { result } => match result {
            Ok(()) if tui.route == Route::Login => ScreenUpdate::navigate(Route::Home),
            Ok(()) => ScreenUpdate::stay(),
            Err(message) => {
                tui.toasts.error(message);
                ScreenUpdate::stay()
            }
        },
        AuthUiEvent::SignupFinished { result } => match result {
            Ok(()) => {
                tui.toasts.success(SIGNUP_SUCCESS_MESSAGE);
                if tui.route == Route::Signup {
                    ScreenUpdate::navigate(Route::Login)
                } else {
                    ScreenUpdate::stay()
                }
            }
            Err(message) => {
                tui.toasts.error(message);
                ScreenUpdate::stay()
            }
        },
    }
}
