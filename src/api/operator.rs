//! Operator guard
//!
//! The management API is for the operator only, recognized by the configured API token in the
//! Authorization header

use std::sync::Arc;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use subtle::ConstantTimeEq;

use crate::api::Error;

/// The token the operator has to present
#[derive(Clone)]
pub struct ApiToken {
    /// The secret itself
    secret: Arc<str>,
}

impl ApiToken {
    /// Create an API token from a secret
    pub fn new<T>(secret: T) -> Self
    where
        T: Into<Arc<str>>,
    {
        Self {
            secret: secret.into(),
        }
    }

    /// Does the presented token match, in constant time
    fn matches(&self, presented: &str) -> bool {
        self.secret.as_bytes().ct_eq(presented.as_bytes()).into()
    }
}

/// Proof the request comes from the operator
pub struct Operator;

impl<S> FromRequestParts<S> for Operator
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::forbidden("Missing API token"))?;

        let Extension(api_token) = parts
            .extract::<Extension<ApiToken>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get the API token"))?;

        if api_token.matches(bearer.token()) {
            Ok(Operator)
        } else {
            Err(Error::forbidden("Invalid API token"))
        }
    }
}
