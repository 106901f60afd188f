//! Post/redirect/get helper.

use actix_web::HttpResponse;
use actix_web::http::header::LOCATION;

/// `303 See Other` to `location`, so the browser follows up with a `GET`.
#[must_use]
pub fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}
