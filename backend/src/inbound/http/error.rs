//! HTTP adapter mapping for domain errors.
//!
//! Errors become HTML error pages with a status derived from the
//! [`ErrorCode`]. Internal failures are redacted so storage or session details
//! never reach the browser; the trace identifier is kept for correlation.

use actix_web::http::header::{CONTENT_TYPE, ContentType, HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use maud::Markup;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::flash::FlashMessages;
use super::views;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

const fn heading_for(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::ServiceUnavailable => "Temporarily unavailable",
        ErrorCode::InternalError => "Something went wrong",
    }
}

fn public_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        "Internal server error"
    } else {
        error.message()
    }
}

/// Build an HTML response with the given status.
#[must_use]
pub fn html_response(status: StatusCode, markup: Markup) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, ContentType::html()))
        .body(markup.into_string())
}

/// Render `error` as a full page, keeping flashes drained earlier in the
/// request visible.
#[must_use]
pub fn error_response_with(error: &Error, flashes: &FlashMessages) -> HttpResponse {
    let code = error.code();
    let page = views::error_page(
        heading_for(code),
        public_message(error),
        error.trace_id(),
        flashes,
    );
    let mut response = html_response(status_for(code), page);
    if let Some(value) = error
        .trace_id()
        .and_then(|id| HeaderValue::from_str(id).ok())
    {
        response
            .headers_mut()
            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
    response
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(code = %self.code(), error = %self, trace_id = ?self.trace_id(), "request failed");
        }
        error_response_with(self, &FlashMessages::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TraceId;
    use actix_web::body::to_bytes;
    use rstest::rstest;

    async fn body_text(response: HttpResponse) -> String {
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        String::from_utf8(bytes.to_vec()).expect("utf8 body")
    }

    #[rstest]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn maps_codes_to_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
        assert_eq!(error.error_response().status(), expected);
    }

    #[actix_web::test]
    async fn redacts_internal_messages() {
        let response = Error::internal("connection string leaked").error_response();
        let body = body_text(response).await;
        assert!(body.contains("Internal server error"));
        assert!(!body.contains("connection string leaked"));
    }

    #[actix_web::test]
    async fn keeps_trace_id_header_and_reference() {
        let trace_id = TraceId::generate();
        let error = TraceId::scope(trace_id, async {
            Error::service_unavailable("Error retrieving posts")
        })
        .await;
        let response = error.error_response();
        let expected = trace_id.to_string();
        assert_eq!(
            response
                .headers()
                .get(TRACE_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some(expected.as_str())
        );
        let body = body_text(response).await;
        assert!(body.contains("Error retrieving posts"));
        assert!(body.contains(&expected));
    }

    #[rstest]
    fn html_response_sets_content_type() {
        let response = html_response(StatusCode::OK, maud::html! { p { "hi" } });
        assert_eq!(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }
}
