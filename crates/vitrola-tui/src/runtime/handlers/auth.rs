use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use vitrola_core::api::UserApi;
use vitrola_core::auth::AuthProvider;

use super::{to_ui_result, until_cancelled};
use crate::events::{AuthUiEvent, UiEvent};

/// Signs in through the shared provider. Not cancellable: a login started on
/// the login screen finishes even if the user navigates away.
pub async fn login(provider: Arc<AuthProvider>, email: String, password: String) -> UiEvent {
    let result = provider
        .login(&email, &password)
        .await
        .map(|_| ())
        .map_err(|err| err.to_string());
    UiEvent::Auth(AuthUiEvent::LoginFinished { result })
}

/// Creates an account.
pub async fn signup(
    users: UserApi,
    name: String,
    email: String,
    password: String,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    match until_cancelled(cancel, users.create_user(&name, &email, &password)).await {
        Some(result) => UiEvent::Auth(AuthUiEvent::SignupFinished {
            result: to_ui_result("signup", result),
        }),
        None => UiEvent::Cancelled,
    }
}
