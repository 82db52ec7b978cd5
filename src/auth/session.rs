use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::warn;

use super::token::TokenKeys;
use crate::{accounts::repo::Account, response::ApiError, state::AppState};

macro_rules! session_cookie_name {
    () => {
        "token"
    };
}

/// Name of the session cookie carrying the identity token.
pub const SESSION_COOKIE: &str = session_cookie_name!();

/// `Set-Cookie` value that expires the session cookie immediately.
pub const CLEAR_SESSION_COOKIE: &str =
    concat!(session_cookie_name!(), "=; Path=/; Max-Age=0");

/// Authenticated session: cookie present, token valid, account still exists.
/// Any failure along that path rejects the request and clears the cookie.
pub struct Session(pub Account);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(ApiError::Unauthenticated)?;

        let keys = TokenKeys::from_ref(state);
        let claims = keys.verify(&token).map_err(|_| {
            warn!("invalid or expired session token");
            ApiError::Unauthenticated
        })?;

        let account = Account::find_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| {
                warn!(account_id = %claims.sub, "session token for missing account");
                ApiError::Unauthenticated
            })?;

        Ok(Session(account))
    }
}
