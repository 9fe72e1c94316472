use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (the external one)
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}
