//! Session bootstrap: resolving an authenticated [`User`].
//!
//! Three ways in: signup, login, or silent re-authentication from stored
//! credentials. The first two propagate failures; the last is the one
//! place in the crate that swallows them, because "no prior session" is an
//! expected steady state rather than an exceptional condition.

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::model::User;

/// Token and username persisted by a previous session.
#[derive(Debug, Clone)]
pub struct StoredCredentials {
    pub token: String,
    pub username: String,
}

/// Register a new account and return the authenticated user.
///
/// A taken username surfaces as [`ApiError::Conflict`]; a rejected
/// password or name as [`ApiError::Validation`]. The returned user starts
/// with empty stories and favorites and a fresh token.
pub async fn signup(
    client: &ApiClient,
    username: &str,
    password: &str,
    name: &str,
) -> Result<User, ApiError> {
    let auth = client.signup(username, password, name).await?;
    info!(username = %auth.user.username, "Account created");
    Ok(User::from_record(auth.user, auth.token))
}

/// Authenticate an existing account and return the populated user.
///
/// Bad credentials surface as [`ApiError::Auth`].
pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<User, ApiError> {
    let auth = client.login(username, password).await?;
    info!(username = %auth.user.username, "Logged in");
    Ok(User::from_record(auth.user, auth.token))
}

/// Silently resume a session from stored credentials.
///
/// Returns `None` on any failure - expired or rejected token, network
/// error - rather than propagating, since callers treat the result as
/// "is there an existing session" and must not crash on a routine miss.
/// The failure is still logged for diagnostics.
pub async fn resolve_stored(client: &ApiClient, credentials: &StoredCredentials) -> Option<User> {
    match client
        .fetch_user(&credentials.token, &credentials.username)
        .await
    {
        Ok(record) => {
            info!(username = %record.username, "Session resumed from stored credentials");
            Some(User::from_record(record, credentials.token.clone()))
        }
        Err(e) => {
            warn!(
                username = %credentials.username,
                error = %e,
                "Stored-credential login failed"
            );
            None
        }
    }
}
