//! Shared harness for HTTP integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{App, test, web};

use quill::Trace;
use quill::domain::ports::FixturePostRepository;
use quill::inbound::http::state::HttpState;
use quill::inbound::http::{SESSION_COOKIE, configure};

/// Response summary captured by [`Browser`].
pub struct Page {
    /// Response status.
    pub status: StatusCode,
    /// `Location` header, when the response redirects.
    pub location: Option<String>,
    /// Body decoded as UTF-8.
    pub body: String,
}

/// Test client that carries the session cookie between requests.
pub struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

/// Start the blog pages over `repo` and return a fresh client.
pub async fn browser(
    repo: Arc<FixturePostRepository>,
) -> Browser<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>>
{
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(repo)))
            .wrap(Trace)
            .service(web::scope("").wrap(session).configure(configure)),
    )
    .await;
    Browser { app, cookie: None }
}

impl<S> Browser<S>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    /// `GET uri`.
    pub async fn get(&mut self, uri: &str) -> Page {
        let req = test::TestRequest::get().uri(uri);
        self.send(req).await
    }

    /// `POST uri` with a URL-encoded form.
    pub async fn post_form(&mut self, uri: &str, form: &[(&str, &str)]) -> Page {
        let req = test::TestRequest::post().uri(uri).set_form(form);
        self.send(req).await
    }

    /// `POST uri` with an arbitrary body.
    pub async fn post_raw(&mut self, uri: &str, content_type: &str, body: String) -> Page {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", content_type))
            .set_payload(body);
        self.send(req).await
    }

    async fn send(&mut self, req: test::TestRequest) -> Page {
        let req = match &self.cookie {
            Some(cookie) => req.cookie(cookie.clone()),
            None => req,
        };
        let res = test::call_service(&self.app, req.to_request()).await;
        if let Some(cookie) = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            self.cookie = Some(cookie.into_owned());
        }
        let status = res.status();
        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = test::read_body(res).await;
        Page {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}
