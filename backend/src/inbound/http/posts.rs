//! Post listing and single post pages.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use tracing::{error, info};

use crate::domain::{Error, PostId};

use super::ApiResult;
use super::error::{error_response_with, html_response};
use super::flash::{FlashCategory, FlashContext};
use super::redirect::redirect_to;
use super::state::HttpState;
use super::views;

/// Banner queued when a post id is malformed or unknown.
pub const POST_NOT_FOUND: &str = "Post not found";
/// Banner queued when the store fails while loading a post.
pub const POST_LOAD_FAILED: &str = "Error retrieving post";
/// Message shown when the home page cannot list posts.
pub const POSTS_LOAD_FAILED: &str = "Error retrieving posts";

/// Home page listing every post.
///
/// A storage failure renders a 503 error page in place; it never redirects
/// back to `/`. Flashes drained beforehand still show on that page.
#[get("/")]
pub async fn home(state: web::Data<HttpState>, flash: FlashContext) -> HttpResponse {
    let messages = flash.drain_all();
    match state.posts.list_all().await {
        Ok(posts) => html_response(StatusCode::OK, views::home(&posts, &messages)),
        Err(err) => {
            error!(error = %err, "failed to list posts");
            error_response_with(&Error::service_unavailable(POSTS_LOAD_FAILED), &messages)
        }
    }
}

/// Single post page.
#[get("/posts/{post_id}")]
pub async fn show_post(
    state: web::Data<HttpState>,
    flash: FlashContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let Ok(id) = PostId::new(&raw) else {
        info!(post_id = %raw, "rejected malformed post id");
        flash.push(FlashCategory::Error, POST_NOT_FOUND)?;
        return Ok(redirect_to("/"));
    };

    match state.posts.find_by_id(&id).await {
        Ok(Some(post)) => {
            let messages = flash.drain_all();
            Ok(html_response(StatusCode::OK, views::post(&post, &messages)))
        }
        Ok(None) => {
            info!(post_id = %id, "post not found");
            flash.push(FlashCategory::Error, POST_NOT_FOUND)?;
            Ok(redirect_to("/"))
        }
        Err(err) => {
            error!(post_id = %id, error = %err, "failed to load post");
            flash.push(FlashCategory::Error, POST_LOAD_FAILED)?;
            Ok(redirect_to("/"))
        }
    }
}
