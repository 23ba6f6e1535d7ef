use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::session::{SessionStore, SESSION_COOKIE};

/// Session gate for owner-scoped routes.
///
/// Looks up the `session_id` cookie in the shared [`SessionStore`]; a live
/// session attaches the user's id to the request for handlers to extract.
/// A missing cookie, an unknown id and an expired session all get the same
/// 401 answer, so a caller cannot tell the three apart.
pub struct RequireSession {
    store: SessionStore,
}

impl RequireSession {
    pub fn new(store: SessionStore) -> Self {
        RequireSession { store }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireSessionService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionService {
            service,
            store: self.store.clone(),
        }))
    }
}

pub struct RequireSessionService<S> {
    service: S,
    store: SessionStore,
}

impl<S, B> Service<ServiceRequest> for RequireSessionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let session_id = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

        let resolved = match session_id {
            Some(id) => self.store.resolve(&id),
            None => Ok(None),
        };

        match resolved {
            Ok(Some(user_id)) => {
                req.extensions_mut().insert(AuthenticatedUserId(user_id));
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Ok(None) => {
                let err = AppError::Unauthenticated(
                    "You must be logged in to access this resource".into(),
                );
                let response = err.error_response().map_into_right_body();
                let (req, _) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
            }
            Err(err) => {
                let response = err.error_response().map_into_right_body();
                let (req, _) = req.into_parts();
                Box::pin(async move { Ok(ServiceResponse::new(req, response)) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::{test, web, App, HttpResponse};
    use chrono::Duration;

    async fn whoami(user: AuthenticatedUserId) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "userId": user.0 }))
    }

    #[actix_web::test]
    async fn test_missing_cookie_is_rejected() {
        let store = SessionStore::new(Duration::hours(1));
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireSession::new(store))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(
            body["error"],
            "You must be logged in to access this resource"
        );
    }

    #[actix_web::test]
    async fn test_unknown_session_id_is_rejected() {
        let store = SessionStore::new(Duration::hours(1));
        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireSession::new(store))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, "deadbeef"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_live_session_attaches_user_id() {
        let store = SessionStore::new(Duration::hours(1));
        let session_id = store.create(42).unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireSession::new(store))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["userId"], 42);
    }

    #[actix_web::test]
    async fn test_expired_session_is_rejected() {
        let store = SessionStore::new(Duration::zero());
        let session_id = store.create(7).unwrap();

        let app = test::init_service(
            App::new().service(
                web::scope("")
                    .wrap(RequireSession::new(store.clone()))
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .cookie(Cookie::new(SESSION_COOKIE, session_id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);

        // The expired record was dropped on the failed lookup
        assert!(store.is_empty());
    }
}
