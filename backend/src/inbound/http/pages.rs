//! Static pages. They never touch the post store.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get};

use super::error::html_response;
use super::flash::FlashContext;
use super::views;

/// About page.
#[get("/about")]
pub async fn about(flash: FlashContext) -> HttpResponse {
    html_response(StatusCode::OK, views::about(&flash.drain_all()))
}

/// Contact page.
#[get("/contact")]
pub async fn contact(flash: FlashContext) -> HttpResponse {
    html_response(StatusCode::OK, views::contact(&flash.drain_all()))
}
