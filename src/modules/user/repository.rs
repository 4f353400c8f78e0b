use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, OnboardUser},
        schema::UserEntity,
    },
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn onboard(
        &self,
        id: &Uuid,
        profile: &OnboardUser,
    ) -> Result<UserEntity, error::SystemError>;

    /// Onboarded users whose id is not in `excluded`, oldest first.
    async fn find_onboarded_excluding(
        &self,
        excluded: &[Uuid],
    ) -> Result<Vec<UserEntity>, error::SystemError>;

    async fn find_friend_ids(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;

    async fn find_friends(&self, user_id: &Uuid) -> Result<Vec<UserEntity>, error::SystemError>;

    /// True when `friend_id` is a member of `user_id`'s friend set.
    async fn is_friend(
        &self,
        user_id: &Uuid,
        friend_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

/// Live refresh-token ids, keyed by `jti`.
#[async_trait::async_trait]
pub trait RefreshTokenStore {
    async fn save(
        &self,
        jti: &Uuid,
        user_id: &Uuid,
        ttl_secs: u64,
    ) -> Result<(), error::SystemError>;

    /// Removes the entry and returns its owner, so a token is only usable once.
    async fn take(&self, jti: &Uuid) -> Result<Option<Uuid>, error::SystemError>;

    async fn revoke(&self, jti: &Uuid) -> Result<(), error::SystemError>;
}
