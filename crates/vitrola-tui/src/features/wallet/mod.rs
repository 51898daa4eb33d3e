//! Wallet screen: balance, points, and credit.

mod render;
mod update;

pub use render::render_wallet;
pub use update::{captures_text, enter, handle_event, handle_key};

use vitrola_core::models::Wallet;

use crate::common::TextField;

#[derive(Debug, Clone, PartialEq)]
pub struct WalletState {
    pub wallet: Option<Wallet>,
    pub loading: bool,
    pub credit_input: TextField,
    /// The credit amount field has focus.
    pub editing: bool,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            wallet: None,
            loading: false,
            credit_input: TextField::new("Amount"),
            editing: false,
        }
    }
}
