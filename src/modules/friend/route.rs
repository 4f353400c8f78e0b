use crate::modules::friend::handle::*;
use actix_web::web::{scope, ServiceConfig};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/users")
            .service(get_recommended_users)
            .service(get_my_friends)
            .service(send_friend_request)
            .service(accept_friend_request)
            .service(decline_friend_request)
            .service(get_friend_requests)
            .service(get_outgoing_friend_requests),
    );
}
