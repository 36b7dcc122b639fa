//! Utility helpers for the Streamify player

pub const CSRF_COOKIE: &str = "csrftoken";

/// Look up `name` in a raw `document.cookie` string and URI-decode its value.
/// The first matching cookie wins; names must match exactly.
pub fn cookie_value(cookie_header: &str, name: &str) -> Option<String> {
    if cookie_header.is_empty() || name.is_empty() {
        return None;
    }

    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            let value = cookie.strip_prefix(name)?.strip_prefix('=')?;
            Some(
                urlencoding::decode(value)
                    .map(|decoded| decoded.into_owned())
                    .unwrap_or_else(|_| value.to_string()),
            )
        })
}

/// Read a cookie from the current page.
#[cfg(target_arch = "wasm32")]
pub fn get_cookie(name: &str) -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?
        .document()?
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?;
    let cookies = document.cookie().ok()?;
    cookie_value(&cookies, name)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn get_cookie(_name: &str) -> Option<String> {
    None
}
