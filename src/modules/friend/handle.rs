use actix_web::{get, post, put, routes, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{
        error,
        success::{self, MessageBody},
    },
    middlewares::get_claims,
    modules::{
        friend::{
            model::{FriendProfile, FriendRequestResponse, FriendRequestsOverview},
            schema::FriendRequestEntity,
            service::FriendService,
        },
        user::model::PublicUserResponse,
    },
};

#[routes]
#[get("")]
#[get("/")]
pub async fn get_recommended_users(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PublicUserResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let users = friend_service.get_recommended_users(user_id).await?;
    Ok(success::Success::ok(users))
}

#[get("/friends")]
pub async fn get_my_friends(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendProfile>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let friends = friend_service.get_friends(user_id).await?;
    Ok(success::Success::ok(friends))
}

#[post("/friend-request/{id}")]
pub async fn send_friend_request(
    friend_service: web::Data<FriendService>,
    recipient_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let request = friend_service.send_friend_request(sender_id, *recipient_id).await?;
    Ok(success::Success::created(request))
}

#[put("/friend-request/{id}/accept")]
pub async fn accept_friend_request(
    friend_service: web::Data<FriendService>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MessageBody>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.accept_friend_request(user_id, *request_id).await?;
    Ok(success::Success::message("Friend Request accepted"))
}

#[put("/friend-request/{id}/decline")]
pub async fn decline_friend_request(
    friend_service: web::Data<FriendService>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MessageBody>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    friend_service.decline_friend_request(user_id, *request_id).await?;
    Ok(success::Success::message("Friend Request declined"))
}

#[get("/friend-requests")]
pub async fn get_friend_requests(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<FriendRequestsOverview>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let overview = friend_service.get_friend_requests(user_id).await?;
    Ok(success::Success::ok(overview))
}

#[get("/outgoing-friend-requests")]
pub async fn get_outgoing_friend_requests(
    friend_service: web::Data<FriendService>,
    req: HttpRequest,
) -> Result<success::Success<Vec<FriendRequestResponse>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let requests = friend_service.get_outgoing_friend_requests(user_id).await?;
    Ok(success::Success::ok(requests))
}
