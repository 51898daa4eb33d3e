//! Wallet command handlers.

use anyhow::{Context, Result};
use vitrola_core::config::Config;
use vitrola_core::interrupt::run_interruptible;
use vitrola_core::models::{Wallet, format_price, parse_amount};

use super::Session;

pub async fn show(config: &Config) -> Result<()> {
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    let wallet = run_interruptible(async { Ok(session.clients.users.wallet(&creds).await?) })
        .await?;
    print_wallet(&wallet);
    Ok(())
}

pub async fn credit(config: &Config, amount: &str) -> Result<()> {
    let value = parse_amount(amount)
        .with_context(|| format!("Invalid amount '{amount}'. Enter a positive number."))?;
    let session = Session::open(config)?;
    let creds = session.auth.require_credentials()?;
    let wallet = run_interruptible(async {
        Ok(session.clients.users.credit_wallet(value, &creds).await?)
    })
    .await?;
    println!("Added {} to your wallet.", format_price(value));
    print_wallet(&wallet);
    Ok(())
}

fn print_wallet(wallet: &Wallet) {
    println!("Balance: {}", format_price(wallet.balance));
    println!("Points:  {}", wallet.points);
    if let Some(updated) = wallet.formatted_last_update() {
        println!("Updated: {updated}");
    }
}
