use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::http_server::{error::PageError, flash, templates};

pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, messages) = flash::take(jar);
    (jar, Html(templates::home(&messages)))
}

pub async fn not_found() -> PageError {
    PageError::NotFound
}
