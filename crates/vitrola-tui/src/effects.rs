//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! ## Cancellation Effects
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes these by calling `token.cancel()` on the provided token.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vitrola_core::models::SaleRequest;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Cancel an in-flight task (or a whole screen scope).
    CancelTask { token: Option<CancellationToken> },

    /// Sign in through the auth provider.
    Login {
        task: TaskId,
        email: String,
        password: String,
    },

    /// Create an account.
    Signup {
        task: TaskId,
        name: String,
        email: String,
        password: String,
    },

    /// Clear the session.
    Logout,

    /// Query the catalog (carousel or search results).
    FetchAlbums { task: TaskId, query: String },

    /// Submit a purchase for the selected album.
    SubmitPurchase { task: TaskId, sale: SaleRequest },

    /// Close the purchase modal after a delay.
    ScheduleModalClose { task: TaskId, delay: Duration },

    /// Load the signed-in user's collection.
    FetchCollection { task: TaskId },

    /// Remove an owned album.
    RemoveAlbum { task: TaskId, id: i64 },

    /// Load the wallet.
    FetchWallet { task: TaskId },

    /// Add credit to the wallet.
    CreditWallet { task: TaskId, value: f64 },
}
