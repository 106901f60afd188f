//! Server-rendered pages.
//!
//! Views are [maud](https://maud.lambda.xyz/) functions returning [`Markup`];
//! every dynamic value is HTML-escaped by the macro. Each page is wrapped in
//! [`layout`], which also renders the flash banners drained by the handler.

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::domain::Post;

use super::flash::FlashMessages;

/// Site name shown in the header and page titles.
pub const SITE_NAME: &str = "Daily Journal";

/// Welcome text shown above the post list.
pub const HOME_CONTENT: &str = "Welcome to the blog website. Here you can find a collection of \
    posts on various topics. Feel free to explore and read the content that interests you.";

/// Body of the About page.
pub const ABOUT_CONTENT: &str = "This is the about page content. Here you can provide some \
    information about the blog, its purpose, and the author.";

/// Body of the Contact page.
pub const CONTACT_CONTENT: &str = "This is the contact page content. You can provide your \
    contact details or a contact form here.";

/// Number of characters of post content shown on the home page.
pub const EXCERPT_CHARS: usize = 100;

const UNTITLED: &str = "Untitled";

const PAGE_CSS: &str = r"
*{box-sizing:border-box}
body{font-family:Georgia,serif;line-height:1.6;color:#222;background:#fdfdfb;margin:0}
header,main,footer{max-width:720px;margin:0 auto;padding:1rem 1.25rem}
header{display:flex;align-items:baseline;justify-content:space-between;border-bottom:1px solid #e5e5e0}
header nav a{margin-left:1rem}
a{color:#3b5bdb;text-decoration:none}
a:hover{text-decoration:underline}
.flash{padding:.75rem 1rem;border-radius:6px;margin:1rem 0}
.flash-success{background:#e6f4ea;color:#1e4620}
.flash-error{background:#fdecea;color:#611a15}
.post{margin:2rem 0}
.post-content{white-space:pre-wrap}
form label{display:block;margin-top:1rem;font-weight:bold}
form input,form textarea{width:100%;padding:.5rem;font:inherit}
form button{margin-top:1rem;padding:.5rem 1.25rem}
footer{color:#888;font-size:.85rem;border-top:1px solid #e5e5e0}
";

fn layout(title: &str, flashes: &FlashMessages, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | " (SITE_NAME) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body {
                header {
                    a.brand href="/" { strong { (SITE_NAME) } }
                    nav {
                        a href="/" { "Home" }
                        a href="/about" { "About" }
                        a href="/contact" { "Contact" }
                        a href="/compose" { "Compose" }
                    }
                }
                main {
                    (flash_banners(flashes))
                    (body)
                }
                footer { "Made with Rust." }
            }
        }
    }
}

fn flash_banners(flashes: &FlashMessages) -> Markup {
    html! {
        @if !flashes.is_empty() {
            section.flashes {
                @for (category, messages) in flashes.iter() {
                    @for message in messages {
                        div class=(format!("flash flash-{}", category.as_str())) role="alert" {
                            (message)
                        }
                    }
                }
            }
        }
    }
}

/// Truncate `content` to at most `max_chars` characters, appending an
/// ellipsis when anything was cut.
///
/// # Examples
/// ```
/// use quill::inbound::http::views::excerpt;
///
/// assert_eq!(excerpt("short", 10), "short");
/// assert_eq!(excerpt("abcdef", 3), "abc...");
/// ```
#[must_use]
pub fn excerpt(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", content.get(..cut).unwrap_or(content)),
        None => content.to_owned(),
    }
}

/// Home page: welcome text followed by every post with an excerpt.
#[must_use]
pub fn home(posts: &[Post], flashes: &FlashMessages) -> Markup {
    layout(
        "Home",
        flashes,
        html! {
            h1 { "Home" }
            p { (HOME_CONTENT) }
            @if posts.is_empty() {
                p.empty { "No posts yet. " a href="/compose" { "Write the first one." } }
            }
            @for post in posts {
                article.post {
                    h2 { (post.title().unwrap_or(UNTITLED)) }
                    p { (excerpt(post.content().unwrap_or_default(), EXCERPT_CHARS)) }
                    a href=(format!("/posts/{}", post.id())) { "Read more" }
                }
            }
        },
    )
}

/// Compose form posting `postTitle` and `postContent` to `/compose`.
#[must_use]
pub fn compose(flashes: &FlashMessages) -> Markup {
    layout(
        "Compose",
        flashes,
        html! {
            h1 { "Compose" }
            form action="/compose" method="post" {
                label for="postTitle" { "Title" }
                input #postTitle type="text" name="postTitle" autocomplete="off";
                label for="postContent" { "Post" }
                textarea #postContent name="postContent" rows="8" {}
                button type="submit" name="button" { "Publish" }
            }
        },
    )
}

/// Single post page.
#[must_use]
pub fn post(post: &Post, flashes: &FlashMessages) -> Markup {
    let title = post.title().unwrap_or(UNTITLED);
    layout(
        title,
        flashes,
        html! {
            article.post {
                h1 { (title) }
                div.post-content { (post.content().unwrap_or_default()) }
            }
        },
    )
}

/// Static About page.
#[must_use]
pub fn about(flashes: &FlashMessages) -> Markup {
    static_page("About", ABOUT_CONTENT, flashes)
}

/// Static Contact page.
#[must_use]
pub fn contact(flashes: &FlashMessages) -> Markup {
    static_page("Contact", CONTACT_CONTENT, flashes)
}

fn static_page(title: &str, content: &str, flashes: &FlashMessages) -> Markup {
    layout(
        title,
        flashes,
        html! {
            h1 { (title) }
            p { (content) }
        },
    )
}

/// Error page shown when a request cannot be served.
#[must_use]
pub fn error_page(
    heading: &str,
    message: &str,
    trace_id: Option<&str>,
    flashes: &FlashMessages,
) -> Markup {
    layout(
        heading,
        flashes,
        html! {
            h1 { (heading) }
            p { (message) }
            @if let Some(trace_id) = trace_id {
                p.trace { small { "Reference: " code { (trace_id) } } }
            }
            p { a href="/about" { "About this blog" } }
        },
    )
}
