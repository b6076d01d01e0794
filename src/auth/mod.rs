use actix_identity::{CookieIdentityPolicy, Identity, IdentityService};

use crate::errors::ServiceError;
use crate::gamers::Gamer;
use crate::server::State;

pub mod routes;

/// name of the cookie holding the signed gamer identity
pub const COOKIE_NAME: &str = "levelup";

/// Cookie based identities, the cookie content is signed with `private_key`
pub fn identity_service(private_key: &str, secure: bool) -> IdentityService<CookieIdentityPolicy> {
    IdentityService::new(
        CookieIdentityPolicy::new(private_key.as_bytes())
            .name(COOKIE_NAME)
            .path("/")
            .http_only(true)
            .secure(secure),
    )
}

/// the gamer id stored in the identity cookie, without looking the gamer up
pub fn parse_identity(id: &Identity) -> Result<i64, ServiceError> {
    match id.identity() {
        Some(identity) => identity.parse::<i64>().map_err(|_| {
            warn!("malformed identity: {}", identity);
            ServiceError::Unauthorized
        }),
        None => Err(ServiceError::Unauthorized),
    }
}

/// get the gamer_id of the current authenticated session
/// returns Unauthorized when no identity is found or the gamer no longer exists
pub async fn get_gamer_id(id: &Identity, state: &State) -> Result<i64, ServiceError> {
    let gamer_id = parse_identity(id)?;

    state
        .db
        .find_gamer(gamer_id)
        .await
        .map_err(|error| match error {
            ServiceError::NotFound(_) => {
                debug!("identity of deleted gamer {} was used", gamer_id);
                ServiceError::Unauthorized
            }
            error => error,
        })?;

    Ok(gamer_id)
}

/// store the gamer in the identity cookie
pub fn remember(id: &Identity, gamer: &Gamer) {
    id.remember(gamer.id.to_string());
}
