//! HTTP inbound adapter serving the blog's HTML pages.

pub mod compose;
pub mod error;
pub mod flash;
pub mod health;
pub mod pages;
pub mod posts;
pub mod redirect;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

use actix_web::web;

pub use error::ApiResult;

/// Name of the session cookie carrying the flash queue.
pub const SESSION_COOKIE: &str = "session";

/// Register every blog page on `cfg`.
///
/// Callers supply the session middleware and [`state::HttpState`]; health
/// probes are registered separately so they stay outside the session.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(compose::form_config())
        .service(posts::home)
        .service(posts::show_post)
        .service(compose::compose_form)
        .service(compose::publish_post)
        .service(pages::about)
        .service(pages::contact);
}
