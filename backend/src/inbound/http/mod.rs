//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod principal;
pub mod schemas;
pub mod sessions;
pub mod state;
pub mod teachers;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api` route together with the JSON extractor settings.
///
/// Callers provide `web::Data<HttpState>` as app data.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use yoga_backend::inbound::http::{configure, state::HttpState};
///
/// fn app(state: web::Data<HttpState>) {
///     let _app = App::new().app_data(state).configure(configure);
/// }
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config()).service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .service(auth::register)
                    .service(auth::login),
            )
            .service(
                web::scope("/session")
                    .service(sessions::list_sessions)
                    .service(sessions::create_session)
                    .service(sessions::get_session)
                    .service(sessions::update_session)
                    .service(sessions::delete_session)
                    .service(sessions::participate)
                    .service(sessions::no_longer_participate),
            )
            .service(
                web::scope("/teacher")
                    .service(teachers::list_teachers)
                    .service(teachers::get_teacher),
            )
            .service(
                web::scope("/user")
                    .service(users::get_user)
                    .service(users::delete_user),
            ),
    );
}
