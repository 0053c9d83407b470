//! HS256 bearer credentials
//!
//! Minimal JWT handling: JSON header/payload, base64url without padding,
//! HMAC-SHA256 signatures verified with `Mac::verify_slice`.

use crate::infrastructure::entities::{TipoUsuario, Usuario};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use uuid::Uuid;

/// Credential validity window, in days.
pub const VALIDADE_DIAS: i64 = 7;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token inválido")]
    Invalid,
    #[error("Token expirado")]
    Expired,
    #[error("falha ao assinar o token")]
    Signing,
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    typ: String,
}

/// Signed claims carried by every credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub email: String,
    pub tipo: TipoUsuario,
    pub iat: i64,
    pub exp: i64,
}

fn b64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn b64url_decode(s: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD.decode(s.as_bytes()).map_err(|_| TokenError::Invalid)
}

/// Process-wide signing key. Built once at startup from mandatory
/// configuration; there is no fallback secret.
pub struct TokenKey {
    secret: Vec<u8>,
}

impl TokenKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        TokenKey { secret: secret.into() }
    }

    /// Issues a credential for the account, expiring [`VALIDADE_DIAS`] days
    /// after `agora`.
    pub fn issue(&self, usuario: &Usuario, agora: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            id: usuario.id,
            email: usuario.email.clone(),
            tipo: usuario.tipo,
            iat: agora.timestamp(),
            exp: (agora + Duration::days(VALIDADE_DIAS)).timestamp(),
        };

        let header = Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        };

        let header_json = serde_json::to_vec(&header).map_err(|_| TokenError::Signing)?;
        let claims_json = serde_json::to_vec(&claims).map_err(|_| TokenError::Signing)?;

        let signing_input = format!("{}.{}", b64url_encode(&header_json), b64url_encode(&claims_json));

        let mut mac =
            Hmac::<Sha256>::new_from_slice(&self.secret).map_err(|_| TokenError::Signing)?;
        mac.update(signing_input.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}.{}", signing_input, b64url_encode(&signature)))
    }

    /// Verifies structure, signature, and expiry against `agora`.
    pub fn verify(&self, token: &str, agora: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token = token.trim();
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(sig_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Invalid);
        };

        let header_raw = b64url_decode(header_b64)?;
        let header: Header = serde_json::from_slice(&header_raw).map_err(|_| TokenError::Invalid)?;
        if header.alg != "HS256" || !header.typ.eq_ignore_ascii_case("JWT") {
            return Err(TokenError::Invalid);
        }

        let signing_input = format!("{header_b64}.{payload_b64}");
        let sig = b64url_decode(sig_b64)?;

        let mut mac =
            Hmac::<Sha256>::new_from_slice(&self.secret).map_err(|_| TokenError::Invalid)?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&sig).map_err(|_| TokenError::Invalid)?;

        let payload_raw = b64url_decode(payload_b64)?;
        let claims: Claims =
            serde_json::from_slice(&payload_raw).map_err(|_| TokenError::Invalid)?;

        if claims.exp <= agora.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}
