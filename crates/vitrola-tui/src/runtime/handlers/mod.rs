//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. The runtime
//! spawns them and sends the result to its inbox; they never touch state.
//!
//! Screen-scoped handlers race their request against the task's cancellation
//! token and return `UiEvent::Cancelled` when the screen goes away first.

pub mod albums;
pub mod auth;
pub mod wallet;

use std::future::Future;

use tokio_util::sync::CancellationToken;
use vitrola_core::api::{ApiResult, Credentials};

pub use albums::*;
pub use auth::*;
pub use wallet::*;

const NOT_SIGNED_IN: &str = "Not signed in";

/// Runs `fut` unless `cancel` fires first.
pub(crate) async fn until_cancelled<F: Future>(
    cancel: Option<CancellationToken>,
    fut: F,
) -> Option<F::Output> {
    match cancel {
        Some(token) => tokio::select! {
            () = token.cancelled() => None,
            output = fut => Some(output),
        },
        None => Some(fut.await),
    }
}

/// Flattens a service result into the `Result<T, String>` carried by UI events.
pub(crate) fn to_ui_result<T>(operation: &str, result: ApiResult<T>) -> Result<T, String> {
    result.map_err(|err| {
        tracing::warn!(operation, kind = %err.kind, status = ?err.status, "request failed");
        err.message
    })
}

/// Runs an authenticated request, failing fast when there is no session token.
pub(crate) async fn with_credentials<T, F, Fut>(
    creds: Option<Credentials>,
    cancel: Option<CancellationToken>,
    operation: &str,
    f: F,
) -> Option<Result<T, String>>
where
    F: FnOnce(Credentials) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let Some(creds) = creds else {
        return Some(Err(NOT_SIGNED_IN.to_string()));
    };
    let result = until_cancelled(cancel, f(creds)).await?;
    Some(to_ui_result(operation, result))
}
