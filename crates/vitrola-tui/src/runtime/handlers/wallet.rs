use tokio_util::sync::CancellationToken;
use vitrola_core::api::{Credentials, UserApi};

use super::with_credentials;
use crate::events::{UiEvent, WalletUiEvent};

pub async fn fetch_wallet(
    users: UserApi,
    creds: Option<Credentials>,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    with_credentials(creds, cancel, "wallet", |creds| async move {
        users.wallet(&creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Wallet(WalletUiEvent::Loaded { result })
    })
}

pub async fn credit_wallet(
    users: UserApi,
    creds: Option<Credentials>,
    value: f64,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    with_credentials(creds, cancel, "credit_wallet", |creds| async move {
        users.credit_wallet(value, &creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Wallet(WalletUiEvent::Credited { result })
    })
}
