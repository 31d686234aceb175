/// Caller identity established for a single request.
///
/// Attached to the request's execution context once a bearer token has been
/// verified, and read by downstream handlers. Lives no longer than the
/// request it was attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Token subject (the username the token was issued for)
    pub subject: String,

    /// Whether the subject was established from a verified token
    pub authenticated: bool,
}

impl Identity {
    /// Identity backed by a verified token.
    pub fn authenticated(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            authenticated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_identity() {
        let identity = Identity::authenticated("alice");
        assert_eq!(identity.subject, "alice");
        assert!(identity.authenticated);
    }
}
