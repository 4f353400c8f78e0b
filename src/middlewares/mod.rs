use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    Error, HttpMessage, HttpRequest,
};

use crate::{
    api::error,
    utils::{Claims, TypeClaims},
    ENV,
};

fn bearer_claims(req: &ServiceRequest) -> Result<Claims, error::Error> {
    let auth = req.headers().get("Authorization").and_then(|h| h.to_str().ok());
    let token = auth
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| error::Error::unauthorized("Unauthorized - No token provided"))?;

    let claims = Claims::decode(token, ENV.jwt_secret.as_ref())
        .map_err(|_| error::Error::unauthorized("Unauthorized - Invalid token"))?;

    if claims._type == Some(TypeClaims::RefreshToken) {
        return Err(error::Error::unauthorized("Unauthorized - Invalid token"));
    }

    Ok(claims)
}

pub async fn authentication<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    let claims = match bearer_claims(&req) {
        Ok(claims) => claims,
        Err(err) => return Ok(req.error_response(err).map_into_right_body()),
    };

    req.extensions_mut().insert(claims);

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

pub fn get_claims(req: &HttpRequest) -> Result<Claims, error::Error> {
    let extensions = req.extensions();

    let claims = extensions
        .get::<Claims>()
        .ok_or_else(|| error::Error::unauthorized("Unauthorized"))?
        .clone();

    Ok(claims)
}
