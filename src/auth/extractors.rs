use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;

/// Name of the identity cookie. The value is the plaintext username with no
/// signature and no expiry; any client can forge it. That is the trust model
/// of the site, not an oversight.
pub const SESSION_COOKIE: &str = "username";

/// Current username if the identity cookie is present.
pub struct OptionalUser(pub Option<String>);

/// Current username; rejects with a redirect to the login page when absent.
pub struct AuthUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(OptionalUser(
            jar.get(SESSION_COOKIE).map(|c| c.value().to_string()),
        ))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // "Not logged in" is recoverable: send the caller to the login form
        // instead of a bare 401.
        match OptionalUser::from_request_parts(parts, state).await {
            Ok(OptionalUser(Some(username))) => Ok(AuthUser(username)),
            _ => Err(Redirect::to("/login")),
        }
    }
}
