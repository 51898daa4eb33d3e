//! Purchase payloads and collection summaries.

use anyhow::{Result, bail};

use crate::models::{Album, CollectionAlbum, SaleRequest, SaleUser, UserProfile, format_price};

/// Builds the sale request for an album on behalf of the signed-in user.
///
/// The password is only embedded when `include_password` is set.
///
/// # Errors
/// Returns an error if the user is not identified or the album has no catalog id.
pub fn build_sale(
    album: &Album,
    user: &UserProfile,
    include_password: bool,
) -> Result<SaleRequest> {
    if !user.is_identified() {
        bail!("Not signed in");
    }
    if album.id.trim().is_empty() {
        bail!("Album has no catalog id");
    }

    Ok(SaleRequest {
        name: album.name.clone(),
        id_spotify: album.id.clone(),
        artist_name: album.artist_name().to_string(),
        image_url: album.image_url().to_string(),
        value: album.value,
        users: SaleUser {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: include_password.then(|| user.password.clone()),
        },
    })
}

/// Totals shown on the collection screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionSummary {
    pub count: usize,
    pub total_spent: f64,
}

impl CollectionSummary {
    pub fn of(albums: &[CollectionAlbum]) -> Self {
        Self {
            count: albums.len(),
            total_spent: albums.iter().map(|a| a.value).sum(),
        }
    }

    /// Total spent as `R$12.34`.
    pub fn formatted_total(&self) -> String {
        format_price(self.total_spent)
    }
}
