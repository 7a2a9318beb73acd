use actix_web::HttpRequest;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{Admin, ServiceError};

/// Lifetime of an issued token in seconds (24 hours).
pub const TOKEN_TTL_SECS: u64 = 24 * 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (admin id)
    pub email: String,
    pub username: String,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_token(&self, admin: &Admin) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_in = Duration::seconds(TOKEN_TTL_SECS as i64);

        let claims = Claims {
            sub: admin.id.to_string(),
            email: admin.email.clone(),
            username: admin.username.clone(),
            exp: (now + expires_in).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn verify_token(
        &self,
        token: &str,
    ) -> Result<TokenData<Claims>, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
    }
}

pub fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    let auth_header = req
        .headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")?;

    // Swagger UI sometimes sends "Bearer bearer <token>"
    if auth_header.starts_with("bearer ") {
        Some(auth_header.strip_prefix("bearer ")?.to_string())
    } else {
        Some(auth_header.to_string())
    }
}

pub fn verify_jwt(req: &HttpRequest, jwt_manager: &JwtManager) -> Result<Claims, ServiceError> {
    let token = extract_token_from_header(req).ok_or_else(|| {
        ServiceError::AuthenticationError("Missing Authorization header".to_string())
    })?;

    match jwt_manager.verify_token(&token) {
        Ok(token_data) => Ok(token_data.claims),
        Err(_) => Err(ServiceError::AuthenticationError(
            "Invalid or expired token".to_string(),
        )),
    }
}
