use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::claims::Claims;
use super::claims::TokenKind;
use super::errors::JwtError;

struct SigningKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }
}

/// Issues and verifies access and refresh tokens.
///
/// Generic over the subject type to allow services to define their own token payload.
/// Uses HS256 (HMAC with SHA-256) with one secret per [`TokenKind`].
pub struct TokenCodec {
    access: SigningKeys,
    refresh: SigningKeys,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec from the access and refresh secrets.
    ///
    /// # Arguments
    /// * `access_secret` - Secret for signing access tokens
    /// * `refresh_secret` - Secret for signing refresh tokens
    ///
    /// # Returns
    /// TokenCodec configured with HS256
    ///
    /// # Errors
    /// * `InvalidSecret` - A secret is empty or both secrets are identical
    ///
    /// # Security Notes
    /// - Each secret should be at least 256 bits (32 bytes) for HS256
    /// - Leaking one secret must not allow forging the other token kind,
    ///   which is why identical secrets are rejected
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Result<Self, JwtError> {
        if access_secret.is_empty() || refresh_secret.is_empty() {
            return Err(JwtError::InvalidSecret(
                "signing secrets must not be empty".to_string(),
            ));
        }
        if access_secret == refresh_secret {
            return Err(JwtError::InvalidSecret(
                "access and refresh secrets must differ".to_string(),
            ));
        }

        Ok(Self {
            access: SigningKeys::from_secret(access_secret),
            refresh: SigningKeys::from_secret(refresh_secret),
            algorithm: Algorithm::HS256,
        })
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Sign a token of the given kind.
    ///
    /// # Arguments
    /// * `kind` - Selects the signing secret
    /// * `subject` - Identity claims to embed
    /// * `now` - Issuance instant
    /// * `ttl` - Token lifetime, `exp = now + ttl`
    ///
    /// # Returns
    /// Compact, URL-safe JWT string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed or `now + ttl` overflows
    pub fn issue<S: Serialize>(
        &self,
        kind: TokenKind,
        subject: &S,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::issue(subject, now, ttl)?;

        encode(&header, &claims, &self.keys(kind).encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token of the given kind and return its subject.
    ///
    /// Expiry is checked against `now` rather than the system clock.
    ///
    /// # Arguments
    /// * `kind` - Selects the verification secret
    /// * `token` - JWT string to verify
    /// * `now` - Verification instant
    ///
    /// # Returns
    /// The embedded subject
    ///
    /// # Errors
    /// * `Malformed` - Token structure, encoding, or payload is invalid
    /// * `InvalidSignature` - Signed with another secret, another kind, or tampered with
    /// * `Expired` - Expiration is not in the future
    pub fn verify<S: DeserializeOwned>(
        &self,
        kind: TokenKind,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<S, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<Claims<S>>(token, &self.keys(kind).decoding_key, &validation)
            .map_err(classify)?;

        if token_data.claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims.subject)
    }
}

fn classify(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::InvalidSignature,
        ErrorKind::ExpiredSignature => JwtError::Expired,
        _ => JwtError::Malformed(error.to_string()),
    }
}
