use actix_web::{
    cookie::{time, Cookie},
    get, post, web, HttpRequest,
};

use crate::{
    api::{
        error,
        success::{self, MessageBody},
    },
    constants::REFRESH_TOKEN_COOKIE,
    middlewares::get_claims,
    modules::user::{
        model::{self, AuthResponse, MeResponse, Session},
        service::UserService,
    },
    utils::ValidatedJson,
    ENV,
};

fn refresh_cookie(value: String, max_age: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(actix_web::cookie::SameSite::Strict)
        .max_age(time::Duration::seconds(max_age))
        .finish()
}

fn session_response(session: Session) -> (AuthResponse, Cookie<'static>) {
    let cookie = refresh_cookie(session.refresh_token, ENV.refresh_token_expiration as i64);
    (AuthResponse { access_token: session.access_token, user: session.user }, cookie)
}

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<AuthResponse>, error::Error> {
    let session = user_service.sign_up(user_data.0).await?;
    let (body, cookie) = session_response(session);
    Ok(success::Success::created(body).cookies(vec![cookie]))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::LoginModel>,
) -> Result<success::Success<AuthResponse>, error::Error> {
    let session = user_service.login(user_data.0).await?;
    let (body, cookie) = session_response(session);
    Ok(success::Success::ok(body).cookies(vec![cookie]))
}

#[post("/refresh")]
pub async fn refresh(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<AuthResponse>, error::Error> {
    let refresh_token = req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string());
    let session = user_service.refresh(refresh_token).await?;
    let (body, cookie) = session_response(session);
    Ok(success::Success::ok(body).cookies(vec![cookie]))
}

#[post("/logout")]
pub async fn logout(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<MessageBody>, error::Error> {
    let refresh_token = req.cookie(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string());
    user_service.logout(refresh_token).await?;

    let mut cleared = refresh_cookie(String::new(), 0);
    cleared.set_expires(time::OffsetDateTime::UNIX_EPOCH);

    Ok(success::Success::message("Logout successful").cookies(vec![cleared]))
}

#[post("/onboarding")]
pub async fn onboard(
    user_service: web::Data<UserService>,
    profile: ValidatedJson<model::OnboardModel>,
    req: HttpRequest,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.onboard(id, profile.0).await?;
    Ok(success::Success::ok(user))
}

#[get("/me")]
pub async fn me(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<MeResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.me(id).await?;
    Ok(success::Success::ok(MeResponse { success: true, user }))
}
