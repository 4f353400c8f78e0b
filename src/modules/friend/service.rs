use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendProfile, FriendRequestResponse, FriendRequestsOverview},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::{model::PublicUserResponse, repository::UserRepository},
    },
};

const REQUEST_EXISTS: &str = "A friend request already exists between you and this user";
const ALREADY_ACCEPTED: &str = "Friend request already accepted";

#[derive(Clone)]
pub struct FriendService {
    request_repo: Arc<dyn FriendRequestRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendService {
    pub fn with_dependencies(
        request_repo: Arc<dyn FriendRequestRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { request_repo, user_repo }
    }

    /// Onboarded users the caller is not yet friends with.
    pub async fn get_recommended_users(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PublicUserResponse>, error::SystemError> {
        let mut excluded = self.user_repo.find_friend_ids(&user_id).await?;
        excluded.push(user_id);

        let users = self.user_repo.find_onboarded_excluding(&excluded).await?;
        Ok(users.into_iter().map(PublicUserResponse::from).collect())
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendProfile>, error::SystemError> {
        if self.user_repo.find_by_id(&user_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        let friends = self.user_repo.find_friends(&user_id).await?;
        Ok(friends.into_iter().map(FriendProfile::from).collect())
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if sender_id == recipient_id {
            return Err(error::SystemError::bad_request(
                "You can't send friend request to yourself",
            ));
        }

        if self.user_repo.find_by_id(&recipient_id).await?.is_none() {
            return Err(error::SystemError::not_found("Recipient not found"));
        }

        let (already_friends, existing) = tokio::try_join!(
            self.user_repo.is_friend(&recipient_id, &sender_id),
            self.request_repo.find_between(&sender_id, &recipient_id),
        )?;

        if already_friends {
            return Err(error::SystemError::bad_request("You are already friends with this user"));
        }

        if existing.is_some() {
            return Err(error::SystemError::bad_request(REQUEST_EXISTS));
        }

        // the pair index catches a concurrent insert that passed the check above
        let request = match self.request_repo.create(&sender_id, &recipient_id).await {
            Err(error::SystemError::Conflict(_)) => {
                return Err(error::SystemError::bad_request(REQUEST_EXISTS));
            }
            other => other?,
        };

        info!("Friend request {} sent from {} to {}", request.id, sender_id, recipient_id);
        Ok(request)
    }

    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = self
            .request_repo
            .find_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend Request not found"))?;

        if request.recipient_id != user_id {
            return Err(error::SystemError::forbidden(
                "You are not authorized to accept this request",
            ));
        }

        let accepted = self.request_repo.accept(&request_id).await?;
        info!("Friend request {} accepted by {}", request_id, user_id);
        Ok(accepted)
    }

    pub async fn decline_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let request = self
            .request_repo
            .find_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend Request not found"))?;

        if request.recipient_id != user_id {
            return Err(error::SystemError::forbidden(
                "You are not authorized to decline this request",
            ));
        }

        if request.status == FriendRequestStatus::Accepted {
            return Err(error::SystemError::bad_request(ALREADY_ACCEPTED));
        }

        // an accept may have landed since the read above
        if !self.request_repo.delete_pending(&request_id).await? {
            return match self.request_repo.find_by_id(&request_id).await? {
                Some(_) => Err(error::SystemError::bad_request(ALREADY_ACCEPTED)),
                None => Err(error::SystemError::not_found("Friend Request not found")),
            };
        }
        info!("Friend request {} declined by {}", request_id, user_id);
        Ok(())
    }

    /// Pending requests addressed to the caller plus the caller's accepted ones.
    pub async fn get_friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<FriendRequestsOverview, error::SystemError> {
        let (incoming_reqs, accepted_reqs) = tokio::try_join!(
            self.request_repo.find_to_user(&user_id, FriendRequestStatus::Pending),
            self.request_repo.find_from_user(&user_id, FriendRequestStatus::Accepted),
        )?;

        Ok(FriendRequestsOverview { incoming_reqs, accepted_reqs })
    }

    pub async fn get_outgoing_friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        self.request_repo.find_from_user(&user_id, FriendRequestStatus::Pending).await
    }
}
