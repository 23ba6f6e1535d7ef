pub mod auth;
pub mod health;
pub mod projects;
pub mod tasks;

use actix_web::middleware::Condition;
use actix_web::web;

use crate::auth::RequireSession;
use crate::session::SessionStore;

/// Mounts the API routes and wires the session gate according to each
/// resource's access policy. Flipping a resource's `ACCESS_POLICY` const is
/// enough to change its gating; nothing else in the wiring encodes it.
pub fn config(cfg: &mut web::ServiceConfig, store: &SessionStore) {
    cfg.service(auth::register)
        .service(auth::login)
        .service(
            web::scope("/projects")
                .wrap(Condition::new(
                    projects::ACCESS_POLICY.requires_session(),
                    RequireSession::new(store.clone()),
                ))
                .service(projects::get_projects)
                .service(projects::create_project)
                .service(projects::get_project)
                .service(projects::update_project)
                .service(projects::delete_project),
        )
        .service(
            web::scope("/tasks")
                .wrap(Condition::new(
                    tasks::ACCESS_POLICY.requires_session(),
                    RequireSession::new(store.clone()),
                ))
                .service(tasks::get_tasks)
                .service(tasks::create_task)
                .service(tasks::get_task)
                .service(tasks::update_task),
        );
}
