use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::{api::error, modules::chat::model::ChatClaims};

#[derive(Clone)]
pub struct ChatService {
    api_secret: Option<String>,
}

impl ChatService {
    pub fn new(api_secret: Option<String>) -> Self {
        ChatService { api_secret }
    }

    /// Signs a chat identity token for `user_id` with the provider's API secret.
    pub fn generate_token(&self, user_id: Uuid) -> Result<String, error::SystemError> {
        let secret = self
            .api_secret
            .as_deref()
            .ok_or_else(|| error::SystemError::internal("Stream API secret is missing"))?;

        let claims = ChatClaims {
            user_id: user_id.to_string(),
            iat: chrono::Utc::now().timestamp() as u64,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn token_carries_user_id() {
        let user_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let token = ChatService::new(Some("stream-secret".into())).generate_token(user_id).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        let data = decode::<ChatClaims>(
            &token,
            &DecodingKey::from_secret(b"stream-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.user_id, user_id.to_string());
    }

    #[test]
    fn missing_secret_is_internal() {
        let user_id = Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext));
        let err = ChatService::new(None).generate_token(user_id).unwrap_err();

        let err: error::Error = err.into();
        assert!(matches!(err, error::Error::InternalServer));
    }
}
