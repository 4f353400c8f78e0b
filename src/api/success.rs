use actix_web::{http::StatusCode, HttpResponse};
use std::borrow::Cow;

#[derive(serde::Serialize)]
pub struct MessageBody {
    pub message: Cow<'static, str>,
}

impl MessageBody {
    pub fn new(msg: impl Into<Cow<'static, str>>) -> Self {
        Self { message: msg.into() }
    }
}

/// JSON responder; the body is written as-is, without an envelope.
pub struct Success<T: serde::Serialize> {
    pub status: StatusCode,
    pub body: T,
    pub cookies: Vec<actix_web::cookie::Cookie<'static>>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self { status: StatusCode::OK, body: data, cookies: Vec::new() }
    }

    pub fn created(data: T) -> Self {
        Self { status: StatusCode::CREATED, body: data, cookies: Vec::new() }
    }

    pub fn cookies(mut self, cookies: Vec<actix_web::cookie::Cookie<'static>>) -> Self {
        self.cookies = cookies;
        self
    }
}

impl Success<MessageBody> {
    pub fn message(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::ok(MessageBody::new(msg))
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        let mut response = HttpResponse::build(self.status);

        for cookie in self.cookies {
            response.cookie(cookie);
        }

        response.json(self.body)
    }
}
