use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::{friend::schema::FriendRequestStatus, user::schema::UserEntity};

/// Public part of a user shown next to friends and requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendProfile {
    pub id: Uuid,
    pub full_name: String,
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
}

impl From<UserEntity> for FriendProfile {
    fn from(user: UserEntity) -> Self {
        FriendProfile {
            id: user.id,
            full_name: user.full_name,
            profile_pic: user.profile_pic,
            native_language: user.native_language,
            learning_language: user.learning_language,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdOrInfo {
    Id(Uuid),
    Info(FriendProfile),
}

#[derive(sqlx::FromRow)]
pub struct FriendUserRow {
    pub req_id: Uuid,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub full_name: String,
    pub profile_pic: String,
    pub native_language: String,
    pub learning_language: String,
}

impl FriendUserRow {
    fn profile(&self) -> FriendProfile {
        FriendProfile {
            id: self.user_id,
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
            native_language: self.native_language.clone(),
            learning_language: self.learning_language.clone(),
        }
    }

    /// Row joined on the sender; `recipient_id` is the user the query was for.
    pub fn into_incoming(self, recipient_id: Uuid) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.req_id,
            sender: IdOrInfo::Info(self.profile()),
            recipient: IdOrInfo::Id(recipient_id),
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Row joined on the recipient; `sender_id` is the user the query was for.
    pub fn into_outgoing(self, sender_id: Uuid) -> FriendRequestResponse {
        FriendRequestResponse {
            id: self.req_id,
            sender: IdOrInfo::Id(sender_id),
            recipient: IdOrInfo::Info(self.profile()),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestResponse {
    pub id: Uuid,
    pub sender: IdOrInfo,
    pub recipient: IdOrInfo,
    pub status: FriendRequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestsOverview {
    pub incoming_reqs: Vec<FriendRequestResponse>,
    pub accepted_reqs: Vec<FriendRequestResponse>,
}
