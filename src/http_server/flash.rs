//! One-shot messages carried to the next rendered page in a cookie.

use axum_extra::extract::cookie::{Cookie, CookieJar};

const FLASH_COOKIE: &str = "_flashes";

fn read(jar: &CookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| urlencoding::decode(cookie.value()).ok())
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}

/// Queue `message` for the next page the client renders.
pub fn push(jar: CookieJar, message: impl Into<String>) -> CookieJar {
    let mut messages = read(&jar);
    messages.push(message.into());

    let value = serde_json::to_string(&messages).unwrap_or_else(|_| "[]".to_string());
    let cookie = Cookie::build((FLASH_COOKIE, urlencoding::encode(&value).into_owned()))
        .path("/")
        .http_only(true);

    jar.add(cookie)
}

/// Remove and return every queued message.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<String>) {
    let messages = read(&jar);
    if messages.is_empty() {
        return (jar, messages);
    }

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}
