use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::cart_sessions::DEFAULT_SESSION;
use crate::errors::AppError;

pub const SESSION_HEADER: &str = "x-cart-session";
const MAX_SESSION_LEN: usize = 128;

/// The cart a request operates on, taken from the `x-cart-session` header.
/// Requests without one share the guest cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSession(pub String);

impl CartSession {
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let id = raw.map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Ok(CartSession(DEFAULT_SESSION.to_string()));
        }
        if id.len() > MAX_SESSION_LEN {
            return Err(AppError::BadRequest("cart session id too long".into()));
        }
        if !id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        {
            return Err(AppError::BadRequest(
                "cart session id may only contain letters, digits, '-', '_' and '.'".into(),
            ));
        }
        Ok(CartSession(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for CartSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = match parts.headers.get(SESSION_HEADER) {
            Some(v) => Some(
                v.to_str()
                    .map_err(|_| AppError::BadRequest("cart session id is not ASCII".into()))?,
            ),
            None => None,
        };
        CartSession::parse(raw)
    }
}
