use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::error::AppError;

/// Extracts the authenticated user's id from request extensions.
///
/// Intended for routes sitting behind `RequireSession`, which resolves the
/// session cookie and inserts this value into the request extensions. If the
/// value is missing (the gate did not run, or the route was wired without
/// it), the extractor answers with the same 401 the gate would have given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUserId(pub i64);

impl FromRequest for AuthenticatedUserId {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUserId>().copied() {
            Some(user_id) => ready(Ok(user_id)),
            None => {
                let err = AppError::Unauthenticated(
                    "You must be logged in to access this resource".to_string(),
                );
                ready(Err(err.into()))
            }
        }
    }
}
