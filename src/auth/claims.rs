use serde::{Deserialize, Serialize};

/// Claims carried by a Supabase access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    pub aud: String,

    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    #[serde(default)]
    pub role: Option<String>,
}
