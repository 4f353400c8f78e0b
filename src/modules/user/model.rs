use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::modules::user::schema::UserEntity;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpModel {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginModel {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardModel {
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Full name is required"))]
    pub full_name: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Bio is required"))]
    pub bio: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Native language is required"))]
    pub native_language: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Learning language is required"))]
    pub learning_language: String,
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Location is required"))]
    pub location: String,
    #[validate(url(message = "Profile picture must be a URL"))]
    pub profile_pic: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub struct InsertUser {
    pub email: String,
    pub hash_password: String,
    pub full_name: String,
    pub profile_pic: String,
}

pub struct OnboardUser {
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    pub profile_pic: Option<String>,
}

impl From<OnboardModel> for OnboardUser {
    fn from(model: OnboardModel) -> Self {
        OnboardUser {
            full_name: model.full_name.trim().to_string(),
            bio: model.bio.trim().to_string(),
            native_language: model.native_language.trim().to_lowercase(),
            learning_language: model.learning_language.trim().to_lowercase(),
            location: model.location.trim().to_string(),
            profile_pic: model.profile_pic.filter(|p| !p.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    pub profile_pic: String,
    pub is_onboarded: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friends: Option<Vec<Uuid>>,
}

impl From<UserEntity> for UserResponse {
    fn from(entity: UserEntity) -> Self {
        UserResponse {
            id: entity.id,
            email: entity.email,
            full_name: entity.full_name,
            bio: entity.bio,
            native_language: entity.native_language,
            learning_language: entity.learning_language,
            location: entity.location,
            profile_pic: entity.profile_pic,
            is_onboarded: entity.is_onboarded,
            created_at: entity.created_at,
            friends: None,
        }
    }
}

impl UserResponse {
    pub fn with_friends(mut self, friends: Vec<Uuid>) -> Self {
        self.friends = Some(friends);
        self
    }
}

/// What other users get to see: no email, no friend list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub bio: String,
    pub native_language: String,
    pub learning_language: String,
    pub location: String,
    pub profile_pic: String,
    pub is_onboarded: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for PublicUserResponse {
    fn from(entity: UserEntity) -> Self {
        PublicUserResponse {
            id: entity.id,
            full_name: entity.full_name,
            bio: entity.bio,
            native_language: entity.native_language,
            learning_language: entity.learning_language,
            location: entity.location,
            profile_pic: entity.profile_pic,
            is_onboarded: entity.is_onboarded,
            created_at: entity.created_at,
        }
    }
}

/// Tokens issued on signup, login and refresh.
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserResponse,
}
