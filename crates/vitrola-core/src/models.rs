//! Wire types shared by the user and album services.
//!
//! Field names follow the services' camelCase JSON. Unknown fields are ignored
//! so catalog payloads can carry extra metadata without breaking decoding.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The signed-in user as returned by `GET /users/:id`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserProfile {
    /// A profile with a non-zero id is the only authentication signal.
    pub fn is_identified(&self) -> bool {
        self.id != 0
    }
}

// Never print the password.
impl fmt::Debug for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Request body for `POST /users/auth`.
#[derive(Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /users/auth`.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub token: String,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("id", &self.id)
            .field("token", &mask_secret(&self.token))
            .finish()
    }
}

/// Request body for `POST /users/create`.
#[derive(Clone, Serialize)]
pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// A catalog search result from `GET /albums/all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Album {
    /// Catalog (Spotify) identifier.
    pub id: String,
    pub name: String,
    pub artists: Vec<Artist>,
    pub images: Vec<Image>,
    pub release_date: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_urls: Option<serde_json::Value>,
}

impl Album {
    /// Name of the first credited artist, or an empty string.
    pub fn artist_name(&self) -> &str {
        self.artists.first().map_or("", |a| a.name.as_str())
    }

    /// URL of the first (largest) cover image, or an empty string.
    pub fn image_url(&self) -> &str {
        self.images.first().map_or("", |i| i.url.as_str())
    }

    /// Release date as `DD/MM/YYYY`.
    pub fn formatted_release_date(&self) -> String {
        format_release_date(&self.release_date)
    }
}

/// An owned album from `GET /albums/my-collection`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectionAlbum {
    pub id: i64,
    pub id_spotify: String,
    pub name: String,
    pub artist_name: String,
    pub image_url: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_status: Option<String>,
}

/// The buyer embedded in a sale request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request body for `POST /albums/sale`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub name: String,
    pub id_spotify: String,
    pub artist_name: String,
    pub image_url: String,
    pub value: f64,
    pub users: SaleUser,
}

/// The signed-in user's wallet from `GET /wallet`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wallet {
    pub id: i64,
    pub balance: f64,
    pub points: i64,
    pub last_update: Option<String>,
}

impl Wallet {
    /// Last update as `DD/MM/YYYY HH:MM`, or the raw value if it does not parse.
    pub fn formatted_last_update(&self) -> Option<String> {
        let raw = self.last_update.as_deref()?;
        let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"));
        Some(parsed.map_or_else(
            |_| raw.to_string(),
            |dt| dt.format("%d/%m/%Y %H:%M").to_string(),
        ))
    }
}

/// Reformats a catalog release date (`YYYY-MM-DD`, `YYYY-MM` or `YYYY`) for display.
pub fn format_release_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    // Partial precision dates: reverse the components as-is.
    raw.split('-').rev().collect::<Vec<_>>().join("/")
}

/// Formats a currency amount as `R$12.34`.
pub fn format_price(value: f64) -> String {
    format!("R${value:.2}")
}

/// Parses a wallet credit amount. Accepts `,` as the decimal separator.
///
/// Returns `None` unless the value is finite and positive.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().replace(',', ".").parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Masks a secret for display, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("{}{tail}", "*".repeat(count - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("10"), Some(10.0));
        assert_eq!(parse_amount(" 2,50 "), Some(2.5));
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-3"), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_album_decodes_catalog_json() {
        let json = r#"{
            "albumType": "ALBUM",
            "artists": [{"name": "Red Hot Chili Peppers", "id": "0L8"}],
            "externalUrls": {"externalUrls": {"spotify": "https://open.spotify.com/album/x"}},
            "id": "4d9",
            "name": "Californication",
            "images": [{"url": "https://i.scdn.co/a.jpg", "height": 640, "width": 640}],
            "releaseDate": "1999-06-08",
            "type": "ALBUM",
            "value": 42.5
        }"#;

        let album: Album = serde_json::from_str(json).unwrap();
        assert_eq!(album.id, "4d9");
        assert_eq!(album.artist_name(), "Red Hot Chili Peppers");
        assert_eq!(album.image_url(), "https://i.scdn.co/a.jpg");
        assert_eq!(album.formatted_release_date(), "08/06/1999");
        assert!((album.value - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_album_without_artists_or_images() {
        let album: Album = serde_json::from_str(r#"{"id": "x", "name": "Y"}"#).unwrap();
        assert_eq!(album.artist_name(), "");
        assert_eq!(album.image_url(), "");
    }

    #[test]
    fn test_partial_release_dates() {
        assert_eq!(format_release_date("1991"), "1991");
        assert_eq!(format_release_date("1991-09"), "09/1991");
    }

    #[test]
    fn test_collection_album_decodes() {
        let json = r#"{"id": 7, "idSpotify": "4d9", "name": "Californication",
            "artistName": "RHCP", "imageUrl": "u", "value": 10.0,
            "users": {"id": 1}, "saleStatus": "COMPLETED"}"#;
        let album: CollectionAlbum = serde_json::from_str(json).unwrap();
        assert_eq!(album.id, 7);
        assert_eq!(album.id_spotify, "4d9");
        assert_eq!(album.sale_status.as_deref(), Some("COMPLETED"));
    }

    #[test]
    fn test_sale_request_omits_missing_password() {
        let sale = SaleRequest {
            name: "N".into(),
            id_spotify: "s".into(),
            artist_name: "A".into(),
            image_url: "u".into(),
            value: 1.0,
            users: SaleUser {
                id: 1,
                name: "A".into(),
                email: "a@b.com".into(),
                password: None,
            },
        };
        let json = serde_json::to_value(&sale).unwrap();
        assert_eq!(json["idSpotify"], "s");
        assert_eq!(json["users"]["email"], "a@b.com");
        assert!(json["users"].get("password").is_none());
    }

    #[test]
    fn test_profile_debug_hides_password() {
        let profile = UserProfile {
            id: 1,
            name: "A".into(),
            email: "a@b.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{profile:?}").contains("hunter2"));
    }

    #[test]
    fn test_wallet_last_update_format() {
        let wallet: Wallet = serde_json::from_str(
            r#"{"id": 1, "balance": 100.5, "points": 20, "lastUpdate": "2024-03-01T10:05:00.123"}"#,
        )
        .unwrap();
        assert_eq!(
            wallet.formatted_last_update().as_deref(),
            Some("01/03/2024 10:05")
        );
    }

    #[test]
    fn test_price_and_mask() {
        assert_eq!(format_price(10.0), "R$10.00");
        assert_eq!(format_price(3.456), "R$3.46");
        assert_eq!(mask_secret("abcdefgh"), "****efgh");
        assert_eq!(mask_secret("abc"), "***");
    }
}
