//! Token persistence and forced-logout handling.
//!
//! The token lives in local storage under [`AUTH_STORAGE_KEY`] as
//! `{"state":{"token":...}}`, with a cookie mirror so the backend can see
//! it on non-XHR requests (7 days, `Path=/`, `SameSite=Lax`). A 401 from
//! the backend clears both and navigates to the login page, at most once
//! no matter how many in-flight requests fail together.

use payloads::ClientError;
use serde::{Deserialize, Serialize};
use std::cell::Cell;

pub const AUTH_STORAGE_KEY: &str = "voucher-console-auth";
pub const AUTH_COOKIE_NAME: &str = "voucher_token";

const COOKIE_MAX_AGE_SECS: u32 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedAuth {
    state: PersistedAuthState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedAuthState {
    token: Option<String>,
}

pub fn format_auth_cookie(token: &str) -> String {
    format!(
        "{AUTH_COOKIE_NAME}={token}; Max-Age={COOKIE_MAX_AGE_SECS}; Path=/; SameSite=Lax"
    )
}

fn expired_auth_cookie() -> String {
    format!("{AUTH_COOKIE_NAME}=; Max-Age=0; Path=/; SameSite=Lax")
}

/// Parse the persisted blob back into a token.
pub fn token_from_blob(blob: &str) -> Option<String> {
    serde_json::from_str::<PersistedAuth>(blob)
        .ok()
        .and_then(|auth| auth.state.token)
        .filter(|token| !token.is_empty())
}

pub fn token_to_blob(token: &str) -> String {
    let auth = PersistedAuth {
        state: PersistedAuthState {
            token: Some(token.to_string()),
        },
    };
    serde_json::to_string(&auth).expect("auth blob serializes")
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsCast;

    pub fn storage_get(key: &str) -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }

    pub fn storage_set(key: &str, value: &str) {
        if let Ok(Some(storage)) =
            web_sys::window().unwrap().local_storage()
        {
            let _ = storage.set_item(key, value);
        }
    }

    pub fn storage_remove(key: &str) {
        if let Ok(Some(storage)) =
            web_sys::window().unwrap().local_storage()
        {
            let _ = storage.remove_item(key);
        }
    }

    pub fn set_cookie(value: &str) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Ok(html_document) = document.dyn_into::<web_sys::HtmlDocument>()
        {
            let _ = html_document.set_cookie(value);
        }
    }

    pub fn navigate_to(path: &str) {
        let _ = web_sys::window().unwrap().location().set_href(path);
    }
}

pub fn load_token() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        browser::storage_get(AUTH_STORAGE_KEY)
            .as_deref()
            .and_then(token_from_blob)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn persist_token(token: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        browser::storage_set(AUTH_STORAGE_KEY, &token_to_blob(token));
        browser::set_cookie(&format_auth_cookie(token));
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = token;
    }
    reset_logout_guard();
}

pub fn clear_persisted_auth() {
    #[cfg(target_arch = "wasm32")]
    {
        browser::storage_remove(AUTH_STORAGE_KEY);
        browser::set_cookie(&expired_auth_cookie());
    }
}

thread_local! {
    static LOGOUT_FIRED: Cell<bool> = const { Cell::new(false) };
}

/// Clear persisted auth and navigate to the login entry point.
///
/// Several in-flight requests can all come back 401 together; the guard
/// makes sure storage clearing and navigation run once per burst. Returns
/// whether this call performed the side effects.
pub fn force_logout() -> bool {
    let fired = LOGOUT_FIRED.with(|flag| flag.replace(true));
    if fired {
        return false;
    }
    tracing::warn!("authentication rejected by backend, logging out");
    clear_persisted_auth();
    #[cfg(target_arch = "wasm32")]
    browser::navigate_to("/login");
    true
}

/// Re-arm the forced-logout guard. Called when a new session is
/// established.
pub fn reset_logout_guard() {
    LOGOUT_FIRED.with(|flag| flag.set(false));
}

/// Inspect a normalized error; a 401 triggers the forced logout. Never
/// retried.
pub fn handle_auth_error(error: &ClientError) {
    if error.is_unauthorized() {
        force_logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_blob_round_trip() {
        let blob = token_to_blob("abc123");
        assert_eq!(blob, r#"{"state":{"token":"abc123"}}"#);
        assert_eq!(token_from_blob(&blob).as_deref(), Some("abc123"));
    }

    #[test]
    fn malformed_blob_yields_no_token() {
        assert_eq!(token_from_blob("not json"), None);
        assert_eq!(token_from_blob(r#"{"state":{}}"#), None);
        assert_eq!(token_from_blob(r#"{"state":{"token":""}}"#), None);
    }

    #[test]
    fn cookie_carries_week_expiry_and_lax_policy() {
        let cookie = format_auth_cookie("tok");
        assert_eq!(
            cookie,
            "voucher_token=tok; Max-Age=604800; Path=/; SameSite=Lax"
        );
        assert_eq!(
            expired_auth_cookie(),
            "voucher_token=; Max-Age=0; Path=/; SameSite=Lax"
        );
    }

    #[test]
    fn forced_logout_fires_exactly_once() {
        reset_logout_guard();
        assert!(force_logout());
        // A second 401 from a concurrent request is a no-op.
        assert!(!force_logout());
        reset_logout_guard();
        assert!(force_logout());
        reset_logout_guard();
    }
}
