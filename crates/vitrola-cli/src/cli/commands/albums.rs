//! Album command handlers.

use anyhow::{Result, bail};
use vitrola_core::config::Config;
use vitrola_core::interrupt::run_interruptible;
use vitrola_core::models::{Album, format_price};
use vitrola_core::purchase::{CollectionSummary, build_sale};

use super::Session;

fn search_text<'a>(config: &'a Config, text: Option<&'a str>) -> Result<&'a str> {
    match text.map(str::trim) {
        Some("") => bail!("Type something to search"),
        Some(text) => Ok(text),
        None => Ok(config.effective_default_search()),
    }
}

fn print_album(album: &Album) {
    println!(
        "{}  {} - {} ({})  {}",
        album.id,
        album.artist_name(),
        album.name,
        album.formatted_release_date(),
        format_price(album.value)
    );
}

pub async fn search(config: &Config, text: Option<&str>) -> Result<()> {
    let text = search_text(config, text)?;
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    let albums =
        run_interruptible(async { Ok(session.clients.albums.search(text, &creds).await?) })
            .await?;

    if albums.is_empty() {
        println!("No albums found.");
        return Ok(());
    }
    for album in &albums {
        print_album(album);
    }
    Ok(())
}

pub async fn buy(config: &Config, id: &str, query: Option<&str>) -> Result<()> {
    let text = search_text(config, query)?;
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    let user = session.auth.snapshot().user;

    let albums =
        run_interruptible(async { Ok(session.clients.albums.search(text, &creds).await?) })
            .await?;
    let Some(album) = albums.iter().find(|a| a.id == id) else {
        bail!("Album '{id}' not found in results for '{text}'");
    };

    let sale = build_sale(album, &user, config.purchase.send_password)?;
    run_interruptible(async { Ok(session.clients.albums.buy(&sale, &creds).await?) }).await?;
    tracing::info!(album = %album.id, "album purchased from cli");

    println!("Album purchased!");
    print_album(album);
    Ok(())
}

pub async fn collection(config: &Config) -> Result<()> {
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    let albums =
        run_interruptible(async { Ok(session.clients.albums.my_collection(&creds).await?) })
            .await?;

    let summary = CollectionSummary::of(&albums);
    println!("Total albums: {}", summary.count);
    println!("Total spent:  {}", summary.formatted_total());

    if albums.is_empty() {
        println!("No albums found.");
        return Ok(());
    }
    println!();
    for album in &albums {
        println!(
            "{}  {} - {}  {}",
            album.id,
            album.artist_name,
            album.name,
            format_price(album.value)
        );
    }
    Ok(())
}

pub async fn remove(config: &Config, id: i64) -> Result<()> {
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    run_interruptible(async { Ok(session.clients.albums.remove(id, &creds).await?) }).await?;
    println!("Removed album {id} from your collection.");
    Ok(())
}
