use actix_web::{get, web, HttpRequest};

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::chat::{model::ChatTokenResponse, service::ChatService},
};

#[get("/token")]
pub async fn get_stream_token(
    chat_service: web::Data<ChatService>,
    req: HttpRequest,
) -> Result<success::Success<ChatTokenResponse>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let token = chat_service.generate_token(user_id)?;
    Ok(success::Success::ok(ChatTokenResponse { token }))
}
