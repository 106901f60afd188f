//! Compose form and publish handler.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::PostDraft;

use super::ApiResult;
use super::error::html_response;
use super::flash::{FlashCategory, FlashContext};
use super::redirect::redirect_to;
use super::state::HttpState;
use super::views;

/// Banner queued after a successful publish.
pub const POST_PUBLISHED: &str = "Post published successfully";
/// Banner queued when the store rejects a new post.
pub const POST_SAVE_FAILED: &str = "Error saving post";

/// URL-encoded body of the compose form.
///
/// Both fields are optional; missing fields become `None` and empty strings
/// are kept as given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeForm {
    /// Post title from the `postTitle` input.
    pub post_title: Option<String>,
    /// Post body from the `postContent` textarea.
    pub post_content: Option<String>,
}

impl From<ComposeForm> for PostDraft {
    fn from(form: ComposeForm) -> Self {
        Self {
            title: form.post_title,
            content: form.post_content,
        }
    }
}

/// Compose page.
#[get("/compose")]
pub async fn compose_form(flash: FlashContext) -> HttpResponse {
    let messages = flash.drain_all();
    html_response(StatusCode::OK, views::compose(&messages))
}

/// Largest accepted compose body, matching the 100 KiB limit of common form
/// parsers.
pub const COMPOSE_BODY_LIMIT: usize = 100 * 1024;

/// Form extractor settings for the compose route.
#[must_use]
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().limit(COMPOSE_BODY_LIMIT)
}

/// Persist a new post, then redirect with a banner describing the outcome.
///
/// A body that cannot be decoded, or that exceeds [`COMPOSE_BODY_LIMIT`], is
/// treated like a failed save instead of surfacing a 4xx.
#[post("/compose")]
pub async fn publish_post(
    state: web::Data<HttpState>,
    flash: FlashContext,
    form: Result<web::Form<ComposeForm>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let draft = match form {
        Ok(form) => PostDraft::from(form.into_inner()),
        Err(err) => {
            warn!(error = %err, "rejected compose body");
            flash.push(FlashCategory::Error, POST_SAVE_FAILED)?;
            return Ok(redirect_to("/compose"));
        }
    };
    match state.posts.create(&draft).await {
        Ok(post) => {
            info!(post_id = %post.id(), "post published");
            flash.push(FlashCategory::Success, POST_PUBLISHED)?;
            Ok(redirect_to("/"))
        }
        Err(err) => {
            error!(error = %err, "failed to save post");
            flash.push(FlashCategory::Error, POST_SAVE_FAILED)?;
            Ok(redirect_to("/compose"))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::header::LOCATION;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockPostRepository, PostRepositoryError};
    use crate::domain::{Post, PostId};
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    #[rstest]
    #[case(Some("Hi"), Some("There"))]
    #[case(Some(""), Some(""))]
    #[case(None, Some("body only"))]
    #[case(None, None)]
    fn form_maps_to_draft(#[case] title: Option<&str>, #[case] content: Option<&str>) {
        let form = ComposeForm {
            post_title: title.map(str::to_owned),
            post_content: content.map(str::to_owned),
        };
        let draft = PostDraft::from(form);
        assert_eq!(draft.title.as_deref(), title);
        assert_eq!(draft.content.as_deref(), content);
    }

    #[actix_web::test]
    async fn empty_fields_are_stored_as_given() {
        let mut repo = MockPostRepository::new();
        repo.expect_create()
            .withf(|draft| draft.title.as_deref() == Some("") && draft.content.is_none())
            .times(1)
            .returning(|draft| Ok(Post::from_draft(PostId::random(), draft.clone())));

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(HttpState::new(Arc::new(repo))))
                .service(publish_post),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/compose")
                .insert_header(("content-type", "application/x-www-form-urlencoded"))
                .set_payload("postTitle=")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn compose_page_renders_form() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .service(compose_form),
        )
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/compose").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = String::from_utf8(actix_test::read_body(res).await.to_vec()).expect("utf8");
        assert!(body.contains("name=\"postTitle\""));
    }

    #[actix_web::test]
    async fn publish_passes_fields_and_redirects_home() {
        let mut repo = MockPostRepository::new();
        repo.expect_create()
            .withf(|draft| {
                draft.title.as_deref() == Some("Hello") && draft.content.as_deref() == Some("World")
            })
            .times(1)
            .returning(|draft| Ok(Post::from_draft(PostId::random(), draft.clone())));

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(HttpState::new(Arc::new(repo))))
                .service(publish_post),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/compose")
                .set_form([("postTitle", "Hello"), ("postContent", "World")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/")
        );
        assert!(session_cookie(&res).is_some());
    }

    #[rstest]
    #[case::not_a_form("text/plain", "postTitle=Hi".to_owned())]
    #[case::duplicate_field(
        "application/x-www-form-urlencoded",
        "postTitle=a&postTitle=b".to_owned()
    )]
    #[case::oversized(
        "application/x-www-form-urlencoded",
        format!("postContent={}", "a".repeat(COMPOSE_BODY_LIMIT + 1))
    )]
    #[actix_web::test]
    async fn undecodable_body_returns_to_compose(#[case] content_type: &str, #[case] body: String) {
        let mut repo = MockPostRepository::new();
        repo.expect_create().never();

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(HttpState::new(Arc::new(repo))))
                .app_data(form_config())
                .service(publish_post),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/compose")
                .insert_header(("content-type", content_type))
                .set_payload(body)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/compose")
        );
        assert!(session_cookie(&res).is_some());
    }

    #[actix_web::test]
    async fn failed_publish_returns_to_compose() {
        let mut repo = MockPostRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(PostRepositoryError::connection("refused")));

        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(HttpState::new(Arc::new(repo))))
                .service(publish_post),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/compose")
                .set_form([("postTitle", "Hello")])
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(LOCATION).and_then(|v| v.to_str().ok()),
            Some("/compose")
        );
    }
}
