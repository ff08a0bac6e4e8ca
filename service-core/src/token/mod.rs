//! Access-token codec: RS256 signing and verification of the vale-food
//! claim set. Signing uses the private key, verification only the public
//! key, so services that merely validate tokens never hold the signing
//! secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

/// Claims carried by a vale-food access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Issuer (the trust domain that minted the token)
    pub iss: String,
    /// Subject (canonical user email)
    pub sub: String,
    /// Role name of the subject at issuance
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build a fresh claim set expiring `expiry_seconds` from now.
    pub fn new(issuer: &str, subject: &str, role: &str, expiry_seconds: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_seconds);

        Self {
            iss: issuer.to_string(),
            sub: subject.to_string(),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Any verification failure: bad signature, malformed wire format, or
    /// expired claims. Collapsed into one variant on purpose so callers
    /// cannot distinguish why a token was refused.
    #[error("token rejected")]
    Rejected(#[source] jsonwebtoken::errors::Error),

    #[error("failed to encode token")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid key material: {0}")]
    Key(String),

    #[error("codec holds no signing key")]
    SigningKeyUnavailable,
}

impl From<TokenError> for crate::error::AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Key(_) => crate::error::AppError::ConfigError(anyhow::Error::new(err)),
            _ => crate::error::AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

/// Signs and verifies access tokens. Cheap to clone; the key material is
/// read-only after construction.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: Option<EncodingKey>,
    decoding_key: DecodingKey,
}

impl TokenCodec {
    /// Codec that can both sign and verify, from PEM-encoded RSA keys.
    pub fn from_key_pair(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, TokenError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_pem)
            .map_err(|e| TokenError::Key(format!("private key: {}", e)))?;
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| TokenError::Key(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key: Some(encoding_key),
            decoding_key,
        })
    }

    /// Verification-only codec from a PEM-encoded RSA public key.
    pub fn verify_only(public_pem: &[u8]) -> Result<Self, TokenError> {
        let decoding_key = DecodingKey::from_rsa_pem(public_pem)
            .map_err(|e| TokenError::Key(format!("public key: {}", e)))?;

        Ok(Self {
            encoding_key: None,
            decoding_key,
        })
    }

    /// Load a signing codec from key files on disk.
    pub fn from_key_files(private_path: &str, public_path: &str) -> Result<Self, TokenError> {
        let private_pem = fs::read(private_path)
            .map_err(|e| TokenError::Key(format!("read {}: {}", private_path, e)))?;
        let public_pem = fs::read(public_path)
            .map_err(|e| TokenError::Key(format!("read {}: {}", public_path, e)))?;

        let codec = Self::from_key_pair(&private_pem, &public_pem)?;
        tracing::info!("token codec initialized with RS256 key pair");
        Ok(codec)
    }

    /// Load a verification-only codec from a public key file.
    pub fn from_public_key_file(public_path: &str) -> Result<Self, TokenError> {
        let public_pem = fs::read(public_path)
            .map_err(|e| TokenError::Key(format!("read {}: {}", public_path, e)))?;

        let codec = Self::verify_only(&public_pem)?;
        tracing::info!("token codec initialized with RS256 public key");
        Ok(codec)
    }

    /// Sign a claim set into a compact, URL-safe token.
    pub fn sign(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let encoding_key = self
            .encoding_key
            .as_ref()
            .ok_or(TokenError::SigningKeyUnavailable)?;

        let header = Header::new(Algorithm::RS256);
        encode(&header, claims, encoding_key).map_err(TokenError::Encode)
    }

    /// Parse a token and verify signature and expiry in one step. Expiry is
    /// checked with zero leeway: a token whose `exp` has passed is rejected
    /// exactly like one with a bad signature.
    pub fn parse_and_verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Rejected)?;

        Ok(token_data.claims)
    }
}
