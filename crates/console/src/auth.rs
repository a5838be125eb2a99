//! Bearer-token claim decoding.
//!
//! The platform issues HS256-signed JWTs, but the console has no signing
//! secret: like any browser client it decodes the claims without verifying
//! the signature. Expiry (`exp`) is still validated so a stale persisted
//! token fails safely instead of producing a dead session.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use greenhub_core::types::DbId;

/// The owning-organization claim nested in ONG tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OngClaim {
    pub id: DbId,
}

/// Claims embedded in every platform access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the account's internal database id.
    pub sub: DbId,
    /// Account role (`"ONG"` or `"DONOR"`).
    #[serde(rename = "type")]
    pub role: String,
    /// Server-relative path of the account's profile image.
    #[serde(rename = "imagePath", default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// The organization this account administers; present for ONG accounts.
    #[serde(rename = "Ong", default, skip_serializing_if = "Option::is_none")]
    pub ong: Option<OngClaim>,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Decode a token's claims without verifying its signature.
///
/// Fails on malformed tokens, missing claims, and expired `exp`.
pub fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims)
}
