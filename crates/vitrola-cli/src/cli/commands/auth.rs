//! Session command handlers.

use anyhow::Result;
use vitrola_core::config::Config;
use vitrola_core::interrupt::run_interruptible;

use super::Session;

pub async fn login(config: &Config, email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        anyhow::bail!("Email and password are required");
    }
    let session = Session::open(config)?;
    let profile = run_interruptible(async {
        Ok(session.auth.login(email.trim(), password).await?)
    })
    .await?;
    println!("Signed in as {} <{}>", profile.name, profile.email);
    Ok(())
}

pub fn logout(config: &Config) -> Result<()> {
    let session = Session::open(config)?;
    let was_signed_in = session.auth.snapshot().is_authenticated;
    session.auth.logout()?;
    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

pub async fn signup(config: &Config, name: &str, email: &str, password: &str) -> Result<()> {
    for (label, value) in [("Name", name), ("Email", email), ("Password", password)] {
        if value.trim().is_empty() {
            anyhow::bail!("{label} is required");
        }
    }
    let session = Session::open(config)?;
    run_interruptible(async {
        Ok(session
            .clients
            .users
            .create_user(name.trim(), email.trim(), password)
            .await?)
    })
    .await?;
    println!("Account created for {}. Run `vitrola login` to sign in.", email.trim());
    Ok(())
}

pub fn whoami(config: &Config) -> Result<()> {
    let session = Session::open(config)?;
    let state = session.auth.snapshot();
    if !state.is_authenticated {
        anyhow::bail!("Not signed in. Run `vitrola login` first.");
    }
    println!("{} <{}> (id {})", state.user.name, state.user.email, state.user.id);
    if let Some(creds) = session.auth.credentials() {
        println!("Token: {}", creds.masked());
    }
    println!("User service: {}", session.clients.users.base_url());
    println!("Album service: {}", session.clients.albums.base_url());
    Ok(())
}
