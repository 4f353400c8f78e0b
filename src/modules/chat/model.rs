use serde::{Deserialize, Serialize};

/// Claims the hosted chat provider expects in a user token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatClaims {
    pub user_id: String,
    pub iat: u64,
}

#[derive(Serialize)]
pub struct ChatTokenResponse {
    pub token: String,
}
