//! Anonymous client identity carried in the `client_id` cookie.

use uuid::Uuid;

use crate::http::cookies::Cookies;

/// Cookie holding the client identity.
pub const CLIENT_ID_COOKIE: &str = "client_id";

/// One year, in seconds.
pub const CLIENT_ID_MAX_AGE_SECS: u64 = 31_536_000;

/// Identity used to key a client's audit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    id: String,
    minted: bool,
}

impl ClientIdentity {
    /// Reuse the identity from the cookie, or mint a fresh one.
    pub fn resolve(cookies: &Cookies) -> Self {
        Self::from_cookies(cookies).unwrap_or_else(Self::mint)
    }

    /// Look up the identity without minting. Any non-empty value is accepted.
    pub fn from_cookies(cookies: &Cookies) -> Option<Self> {
        cookies
            .get(CLIENT_ID_COOKIE)
            .filter(|id| !id.is_empty())
            .map(|id| Self {
                id: id.clone(),
                minted: false,
            })
    }

    fn mint() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            minted: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when this identity was created for the current request.
    pub fn is_minted(&self) -> bool {
        self.minted
    }

    /// `Set-Cookie` value persisting this identity, if it was just minted.
    pub fn set_cookie(&self) -> Option<String> {
        self.minted.then(|| {
            format!(
                "{CLIENT_ID_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={CLIENT_ID_MAX_AGE_SECS}",
                self.id
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cookies::parse_cookies;

    #[test]
    fn test_reuses_cookie_without_validation() {
        let identity = ClientIdentity::resolve(&parse_cookies("client_id=not-a-uuid"));
        assert_eq!(identity.id(), "not-a-uuid");
        assert!(!identity.is_minted());
        assert!(identity.set_cookie().is_none());
    }

    #[test]
    fn test_mints_when_absent() {
        let identity = ClientIdentity::resolve(&parse_cookies("theme=dark"));
        assert!(identity.is_minted());
        assert!(Uuid::parse_str(identity.id()).is_ok());

        let cookie = identity.set_cookie().unwrap();
        assert_eq!(
            cookie,
            format!(
                "client_id={}; Path=/; HttpOnly; SameSite=Strict; Max-Age=31536000",
                identity.id()
            )
        );
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let cookies = parse_cookies("client_id=");
        assert!(ClientIdentity::from_cookies(&cookies).is_none());
        assert!(ClientIdentity::resolve(&cookies).is_minted());
    }

    #[test]
    fn test_minted_ids_are_unique() {
        let cookies = Cookies::new();
        let a = ClientIdentity::resolve(&cookies);
        let b = ClientIdentity::resolve(&cookies);
        assert_ne!(a.id(), b.id());
    }
}
