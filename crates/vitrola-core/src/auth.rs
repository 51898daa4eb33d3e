//! Auth state provider and route guard.
//!
//! `AuthProvider` is the single source of truth for "is there a signed-in user"
//! and the only writer of the session store. State changes are published on a
//! `watch` channel so UIs can re-render from snapshots.

use std::fmt;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result, anyhow};
use tokio::sync::watch;

use crate::api::{ApiError, Credentials, UserApi};
use crate::models::UserProfile;
use crate::session::{self, PROFILE_KEY, SessionStore, TOKEN_KEY};

/// Snapshot of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    /// True during startup rehydration and while a login is in flight.
    pub is_loading: bool,
    /// The signed-in user, or empty defaults.
    pub user: UserProfile,
}

impl AuthState {
    fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }
}

/// Why a login attempt failed.
#[derive(Debug)]
pub enum AuthError {
    /// Another login is already in flight (or startup has not finished).
    InProgress,
    /// A service call failed; carries the server's message.
    Api(ApiError),
    /// The session could not be persisted.
    Storage(anyhow::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InProgress => write!(f, "Login already in progress"),
            AuthError::Api(err) => write!(f, "{err}"),
            AuthError::Storage(err) => write!(f, "Failed to save session: {err:#}"),
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::InProgress => None,
            AuthError::Api(err) => Some(err),
            AuthError::Storage(err) => Some(&**err),
        }
    }
}

impl From<ApiError> for AuthError {
    fn from(err: ApiError) -> Self {
        AuthError::Api(err)
    }
}

/// Owns the session lifecycle: rehydration, login, logout and credentials.
pub struct AuthProvider {
    store: Arc<dyn SessionStore>,
    users: UserApi,
    state: watch::Sender<AuthState>,
    credentials: RwLock<Option<Credentials>>,
}

impl AuthProvider {
    /// Creates a provider in the loading state. Call [`AuthProvider::initialize`] once.
    pub fn new(store: Arc<dyn SessionStore>, users: UserApi) -> Self {
        Self {
            store,
            users,
            state: watch::Sender::new(AuthState::loading()),
            credentials: RwLock::new(None),
        }
    }

    /// Rehydrates state from the session store.
    ///
    /// A persisted profile with a non-zero id marks the session authenticated.
    /// A persisted token becomes the active credential independently.
    pub fn initialize(&self) {
        let profile = session::read_profile(self.store.as_ref()).filter(UserProfile::is_identified);
        let token = session::read_token(self.store.as_ref());

        if let Some(token) = token {
            self.set_credentials(Some(Credentials::new(token)));
        }

        let authenticated = profile.is_some();
        self.state.send_replace(AuthState {
            is_authenticated: authenticated,
            is_loading: false,
            user: profile.unwrap_or_default(),
        });
        tracing::debug!(authenticated, "session rehydrated");
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribes to state changes.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Returns the credential attached to authenticated requests, if any.
    pub fn credentials(&self) -> Option<Credentials> {
        match self.credentials.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns the active credential or an error telling the user to sign in.
    ///
    /// # Errors
    /// Returns an error if no session token is available.
    pub fn require_credentials(&self) -> Result<Credentials> {
        self.credentials()
            .ok_or_else(|| anyhow!("Not signed in. Run `vitrola login` first."))
    }

    fn set_credentials(&self, creds: Option<Credentials>) {
        match self.credentials.write() {
            Ok(mut guard) => *guard = creds,
            Err(poisoned) => *poisoned.into_inner() = creds,
        }
    }

    /// Signs in: authenticate, persist the token, fetch and persist the profile.
    ///
    /// Rejected with [`AuthError::InProgress`] while another login (or startup)
    /// is loading. On failure, loading is reset and authentication is unchanged.
    ///
    /// # Errors
    /// Returns an error if a service call fails or the session cannot be saved.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading {
                false
            } else {
                state.is_loading = true;
                true
            }
        });
        if !started {
            return Err(AuthError::InProgress);
        }

        // Resets `is_loading` on every exit path, including cancellation.
        let loading = LoadingGuard { state: &self.state };

        tracing::info!("login started");
        let auth = self.users.authenticate(email, password).await.map_err(|err| {
            tracing::warn!(kind = %err.kind, message = %err.message, "authentication failed");
            AuthError::Api(err)
        })?;

        let previous_token = self.store.get(TOKEN_KEY).map_err(AuthError::Storage)?;
        let previous_creds = self.credentials();

        self.store
            .set(TOKEN_KEY, &auth.token)
            .map_err(AuthError::Storage)?;
        let creds = Credentials::new(auth.token);
        self.set_credentials(Some(creds.clone()));

        let profile = match self.users.fetch_profile(auth.id, &creds).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(kind = %err.kind, message = %err.message, "profile fetch failed");
                self.restore_token(previous_token.as_deref(), previous_creds);
                return Err(AuthError::Api(err));
            }
        };

        let serialized = serde_json::to_string(&profile)
            .context("Failed to serialize profile")
            .map_err(AuthError::Storage)?;
        self.store
            .set(PROFILE_KEY, &serialized)
            .map_err(AuthError::Storage)?;

        loading.disarm();
        self.state.send_replace(AuthState {
            is_authenticated: true,
            is_loading: false,
            user: profile.clone(),
        });
        tracing::info!(user_id = profile.id, "login finished");

        Ok(profile)
    }

    /// Puts back the token that was active before a failed login.
    fn restore_token(&self, token: Option<&str>, creds: Option<Credentials>) {
        let restored = match token {
            Some(token) => self.store.set(TOKEN_KEY, token),
            None => self.store.remove(TOKEN_KEY),
        };
        if let Err(err) = restored {
            tracing::warn!("could not restore the previous session token: {err:#}");
        }
        self.set_credentials(creds);
    }

    /// Signs out: clears both session entries and resets state. No network call.
    ///
    /// State is reset even when the store cannot be cleared.
    ///
    /// # Errors
    /// Returns an error if a session entry cannot be removed.
    pub fn logout(&self) -> Result<()> {
        let profile_result = self.store.remove(PROFILE_KEY);
        let token_result = self.store.remove(TOKEN_KEY);

        self.set_credentials(None);
        self.state.send_replace(AuthState::default());
        tracing::info!("logged out");

        profile_result.context("Failed to clear stored profile")?;
        token_result.context("Failed to clear stored token")?;
        Ok(())
    }
}

struct LoadingGuard<'a> {
    state: &'a watch::Sender<AuthState>,
}

impl LoadingGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            let was_loading = state.is_loading;
            state.is_loading = false;
            was_loading
        });
    }
}

/// What to show for a protected screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Still loading: show a neutral placeholder, never redirect.
    Pending,
    /// Signed in: render the protected screen.
    Render,
    /// Signed out: go to the login screen.
    RedirectToLogin,
}

/// Decides how a protected screen should be handled for a state snapshot.
pub fn route_guard(state: &AuthState) -> GuardDecision {
    if state.is_loading {
        GuardDecision::Pending
    } else if state.is_authenticated {
        GuardDecision::Render
    } else {
        GuardDecision::RedirectToLogin
    }
}
