//! Browser Token Store: bearer token in a cookie, profile in `localStorage`.
//!
//! SYSTEM CONTEXT
//! ==============
//! The cookie keeps the token visible to same-site requests and expires on
//! its own after the configured max-age. The profile is only a cache; the
//! controller re-validates it against the backend on startup.
//!
//! TRADE-OFFS
//! ==========
//! Native builds (tests, tooling) have no browser storage, so without `csr`
//! the store reads nothing and writes are accepted and dropped. Nothing
//! coordinates writes across tabs.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use session::{SessionConfig, StoreError, TokenStore, User};
#[cfg(feature = "csr")]
use wasm_bindgen::JsCast;

/// Cookie + `localStorage` implementation of [`TokenStore`].
#[derive(Clone, Debug)]
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
pub struct BrowserTokenStore {
    cookie_name: String,
    user_key: String,
    max_age_days: u32,
    /// Mark the token cookie `Secure`; on when the page is served over https.
    secure: bool,
}

impl BrowserTokenStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.token_cookie.clone(),
            user_key: config.user_storage_key.clone(),
            max_age_days: config.token_max_age_days,
            secure: page_is_https(),
        }
    }
}

fn page_is_https() -> bool {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| w.location().protocol().ok())
            .is_some_and(|protocol| protocol == "https:")
    }
    #[cfg(not(feature = "csr"))]
    {
        false
    }
}

// =============================================================================
// COOKIE FORMAT
// =============================================================================

/// `document.cookie` assignment that stores `value` for `max_age_days`.
pub fn build_cookie(name: &str, value: &str, max_age_days: u32, secure: bool) -> String {
    Cookie::build((name, value))
        .path("/")
        .max_age(Duration::days(i64::from(max_age_days)))
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
        .encoded()
        .to_string()
}

/// `document.cookie` assignment that deletes `name`.
pub fn expire_cookie(name: &str) -> String {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .same_site(SameSite::Lax)
        .build()
        .to_string()
}

/// Find `name` in a `document.cookie` string. Blank values count as absent.
pub fn find_cookie(header: &str, name: &str) -> Option<String> {
    Cookie::split_parse_encoded(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == name)
        .map(|c| c.value().to_owned())
        .filter(|value| !value.is_empty())
}

// =============================================================================
// BROWSER ACCESS
// =============================================================================

#[cfg(feature = "csr")]
fn html_document() -> Result<web_sys::HtmlDocument, StoreError> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| StoreError::Unavailable("document not available".to_owned()))
}

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StoreError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| StoreError::Unavailable("localStorage not available".to_owned()))
}

#[cfg(feature = "csr")]
fn js_error(e: &wasm_bindgen::JsValue) -> StoreError {
    StoreError::Unavailable(format!("{e:?}"))
}

impl TokenStore for BrowserTokenStore {
    fn set_token(&self, token: &str) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            let cookie = build_cookie(&self.cookie_name, token, self.max_age_days, self.secure);
            html_document()?.set_cookie(&cookie).map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
            Ok(())
        }
    }

    fn get_token(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let header = html_document().ok()?.cookie().ok()?;
            find_cookie(&header, &self.cookie_name)
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn set_user_data(&self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(&self.user_key, &raw)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = raw;
            Ok(())
        }
    }

    fn get_user_data(&self) -> Option<User> {
        #[cfg(feature = "csr")]
        {
            let raw = local_storage().ok()?.get_item(&self.user_key).ok().flatten()?;
            match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    log::warn!("ignoring corrupt cached user: {e}");
                    None
                }
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        #[cfg(feature = "csr")]
        {
            html_document()?
                .set_cookie(&expire_cookie(&self.cookie_name))
                .map_err(|e| js_error(&e))?;
            local_storage()?
                .remove_item(&self.user_key)
                .map_err(|e| js_error(&e))
        }
        #[cfg(not(feature = "csr"))]
        {
            Ok(())
        }
    }
}
