use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::FriendRequestResponse;
use crate::modules::friend::schema::{FriendRequestEntity, FriendRequestStatus};

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    /// Any request between the two users, in either direction and any status.
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    /// Requests addressed to `user_id`, with the sender's profile attached.
    async fn find_to_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    /// Requests sent by `user_id`, with the recipient's profile attached.
    async fn find_from_user(
        &self,
        user_id: &Uuid,
        status: FriendRequestStatus,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError>;

    async fn create(
        &self,
        sender_id: &Uuid,
        recipient_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Marks the request accepted and adds each side to the other's friend set,
    /// all in one transaction. Re-running it on an accepted request changes nothing.
    async fn accept(&self, request_id: &Uuid) -> Result<FriendRequestEntity, error::SystemError>;

    /// Deletes the request only while it is still pending; false when nothing was removed.
    async fn delete_pending(&self, request_id: &Uuid) -> Result<bool, error::SystemError>;
}
