use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vitrola_core::api::{AlbumApi, Credentials};
use vitrola_core::models::SaleRequest;

use super::{until_cancelled, with_credentials};
use crate::events::{CollectionUiEvent, HomeUiEvent, UiEvent};

/// Queries the catalog for the carousel or a search.
pub async fn fetch_albums(
    albums: AlbumApi,
    creds: Option<Credentials>,
    query: String,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    with_credentials(creds, cancel, "search", |creds| async move {
        albums.search(&query, &creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Home(HomeUiEvent::AlbumsLoaded { result })
    })
}

pub async fn submit_purchase(
    albums: AlbumApi,
    creds: Option<Credentials>,
    sale: SaleRequest,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let album_id = sale.id_spotify.clone();
    with_credentials(creds, cancel, "buy", |creds| async move {
        albums.buy(&sale, &creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Home(HomeUiEvent::PurchaseFinished { album_id, result })
    })
}

/// Waits before closing the purchase modal.
pub async fn modal_close(delay: Duration, cancel: Option<CancellationToken>) -> UiEvent {
    match until_cancelled(cancel, tokio::time::sleep(delay)).await {
        Some(()) => UiEvent::Home(HomeUiEvent::ModalCloseElapsed),
        None => UiEvent::Cancelled,
    }
}

pub async fn fetch_collection(
    albums: AlbumApi,
    creds: Option<Credentials>,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    with_credentials(creds, cancel, "my_collection", |creds| async move {
        albums.my_collection(&creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Collection(CollectionUiEvent::Loaded { result })
    })
}

pub async fn remove_album(
    albums: AlbumApi,
    creds: Option<Credentials>,
    id: i64,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    with_credentials(creds, cancel, "remove", |creds| async move {
        albums.remove(id, &creds).await
    })
    .await
    .map_or(UiEvent::Cancelled, |result| {
        UiEvent::Collection(CollectionUiEvent::Removed { result })
    })
}
