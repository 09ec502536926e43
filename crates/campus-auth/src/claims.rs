//! JWT claim structures for session tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_models::AccountRole;

/// Which of the two session tokens a JWT is. Serialized as the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims carried by both access and refresh tokens.
///
/// - `sub`: account id
/// - `role`: account role at issue time
/// - `type`: token kind; verification rejects a token presented as the other kind
/// - `jti`: random id so two tokens minted in the same second still differ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: AccountRole,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub exp: usize,
    pub iat: usize,
    pub jti: String,
}

impl Claims {
    /// The subject as an account id, `None` when the claim is not a UUID.
    pub fn account_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}
