//! Screen routes.

use std::fmt;

/// A navigable screen, addressed by a path like `/home`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Signup,
    Home,
    Collection,
    Wallet,
    /// Any unknown path.
    NotFound(String),
}

impl Route {
    /// Parses a path. Unknown paths map to [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };
        match normalized {
            "" | "/" => Route::Landing,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/home" => Route::Home,
            "/my-collection" => Route::Collection,
            "/wallet" => Route::Wallet,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Signup => "/signup",
            Route::Home => "/home",
            Route::Collection => "/my-collection",
            Route::Wallet => "/wallet",
            Route::NotFound(path) => path,
        }
    }

    /// Protected routes require a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home | Route::Collection | Route::Wallet)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/home/"), Route::Home);
        assert_eq!(Route::parse("/my-collection"), Route::Collection);
        assert_eq!(Route::parse("/wallet"), Route::Wallet);
    }

    #[test]
    fn test_unknown_route_is_not_found() {
        assert_eq!(
            Route::parse("/nope"),
            Route::NotFound("/nope".to_string())
        );
        assert!(!Route::parse("/nope").is_protected());
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Home.is_protected());
        assert!(Route::Collection.is_protected());
        assert!(Route::Wallet.is_protected());
        assert!(!Route::Login.is_protected());
    }
}
