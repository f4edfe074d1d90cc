//! Bearer-token authentication.
//!
//! Tokens are HMAC-SHA256 signed and carry an issue timestamp for
//! expiration checking.
//!
//! ## Token layout (before base64url encoding)
//!
//! - 2 bytes: user-id length (big-endian)
//! - N bytes: user-id (UTF-8)
//! - 8 bytes: issue timestamp (Unix millis, big-endian)
//! - 32 bytes: HMAC-SHA256 signature over everything above

use crate::error::{ServerError, ServerResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use wordsync_protocol::UserId;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_LEN: usize = 32;
const TIMESTAMP_LEN: usize = 8;
const LENGTH_PREFIX_LEN: usize = 2;

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key for HMAC.
    pub secret: Vec<u8>,
    /// Token expiration duration.
    pub token_expiry: Duration,
}

impl AuthConfig {
    /// Creates a new auth configuration with a 24-hour expiry.
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            token_expiry: Duration::from_secs(24 * 60 * 60),
        }
    }

    /// Sets the token expiration duration.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }
}

/// Issues and validates bearer tokens.
#[derive(Clone)]
pub struct TokenValidator {
    config: AuthConfig,
}

impl TokenValidator {
    /// Creates a new token validator.
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issues a token for a user, base64url-encoded for transport.
    pub fn issue(&self, user: &UserId) -> String {
        let id = user.as_str().as_bytes();
        let timestamp = now_millis();

        let mut data =
            Vec::with_capacity(LENGTH_PREFIX_LEN + id.len() + TIMESTAMP_LEN + SIGNATURE_LEN);
        data.extend_from_slice(&(id.len() as u16).to_be_bytes());
        data.extend_from_slice(id);
        data.extend_from_slice(&timestamp.to_be_bytes());

        let signature = self.sign(&data);
        data.extend_from_slice(&signature);

        URL_SAFE_NO_PAD.encode(data)
    }

    /// Validates a token and returns the user identity it names.
    pub fn authenticate(&self, token: &str) -> ServerResult<UserId> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| ServerError::NotAuthorized("malformed token".into()))?;

        if raw.len() < LENGTH_PREFIX_LEN + TIMESTAMP_LEN + SIGNATURE_LEN {
            return Err(ServerError::NotAuthorized("token too short".into()));
        }

        let id_len = u16::from_be_bytes(raw[0..LENGTH_PREFIX_LEN].try_into().unwrap()) as usize;
        let signed_len = LENGTH_PREFIX_LEN + id_len + TIMESTAMP_LEN;
        if raw.len() != signed_len + SIGNATURE_LEN {
            return Err(ServerError::NotAuthorized("token length mismatch".into()));
        }

        let signature = &raw[signed_len..];
        let expected = self.sign(&raw[..signed_len]);
        if signature != expected.as_slice() {
            return Err(ServerError::NotAuthorized("invalid signature".into()));
        }

        let ts_start = LENGTH_PREFIX_LEN + id_len;
        let timestamp =
            u64::from_be_bytes(raw[ts_start..ts_start + TIMESTAMP_LEN].try_into().unwrap());
        let expiry_millis = self.config.token_expiry.as_millis() as u64;
        if now_millis() > timestamp + expiry_millis {
            return Err(ServerError::NotAuthorized("token expired".into()));
        }

        let id = std::str::from_utf8(&raw[LENGTH_PREFIX_LEN..ts_start])
            .map_err(|_| ServerError::NotAuthorized("token user id is not UTF-8".into()))?;
        Ok(UserId::new(id))
    }

    /// Signs data with HMAC-SHA256.
    fn sign(&self, data: &[u8]) -> [u8; SIGNATURE_LEN] {
        let mut mac =
            HmacSha256::new_from_slice(&self.config.secret).expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
