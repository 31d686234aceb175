use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Issues and verifies signed bearer tokens.
///
/// Tokens are standard three-part `header.payload.signature` structures,
/// Base64url-encoded and signed with HMAC-SHA512 over the shared secret.
/// The codec holds no mutable state; issuance and verification are pure
/// functions over their inputs plus the immutable secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenCodec {
    /// Create a codec over a signing secret and a fixed token lifetime.
    ///
    /// The secret should be at least 32 bytes and must be injected by the
    /// bootstrap layer; `ttl` must be positive so that `exp > iat` holds
    /// for every issued token.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS512,
            ttl,
        }
    }

    /// Token lifetime applied at issuance.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject`, issued at `now`, expiring at `now + ttl`.
    ///
    /// # Errors
    /// * `Signing` - the signing subsystem failed; fatal, not expected in
    ///   practice for HMAC keys
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims::new(subject, now, self.ttl);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token string at instant `now` and return its subject.
    ///
    /// # Errors
    /// * `Malformed` - not parseable into the expected structure
    /// * `BadSignature` - signature does not match recomputation with the
    ///   secret (including any altered payload byte)
    /// * `Expired` - `now >= exp`
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        // Expiry is checked against the caller-supplied clock below, with no
        // leeway, so verification stays deterministic under test clocks.
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        if data.claims.is_expired(now) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}
