use actix_cors::Cors;
use actix_web::{
    self,
    middleware::{from_fn, Logger},
    web, App, HttpServer,
};
use std::sync::{Arc, LazyLock};

use crate::{
    api::error,
    configs::{connect_database, RedisCache},
    middlewares::authentication,
    modules::{
        chat::service::ChatService,
        friend::{repository_pg::FriendRepositoryPg, service::FriendService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    env_logger::init();
    log::info!("Environment variables loaded from .env file");
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

/// Everything under `/api`; auth routes are public, the rest need a bearer token.
pub fn api_configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|err, _| error::Error::bad_request(err.to_string()).into()),
    )
    .service(
        web::scope("/api").configure(modules::user::route::configure).service(
            web::scope("")
                .wrap(from_fn(authentication))
                .configure(modules::friend::route::configure)
                .configure(modules::chat::route::configure),
        ),
    );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let db_pool = connect_database().await.map_err(|e| {
        log::error!("Database connection error: {e:?}");
        std::io::Error::other("Database connection error")
    })?;

    let redis_pool = RedisCache::new().await.map_err(|e| {
        log::error!("Redis connection error: {e:?}");
        std::io::Error::other("Redis connection error")
    })?;

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let friend_repo = Arc::new(FriendRepositoryPg::new(db_pool));

    let user_service = UserService::with_dependencies(user_repo.clone(), Arc::new(redis_pool));
    let friend_service = FriendService::with_dependencies(friend_repo, user_repo);
    let chat_service = ChatService::new(ENV.stream_api_secret.clone());

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&ENV.frontend_url)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(friend_service.clone()))
            .app_data(web::Data::new(chat_service.clone()))
            .service(health_check)
            .configure(api_configure)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}
