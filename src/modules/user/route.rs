use crate::{middlewares::authentication, modules::user::handle::*};
use actix_web::{
    middleware::from_fn,
    web::{scope, ServiceConfig},
};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/auth")
            .service(sign_up)
            .service(login)
            .service(refresh)
            .service(logout)
            .service(scope("").wrap(from_fn(authentication)).service(onboard).service(me)),
    );
}
