//! Client-Side Persistence
//!
//! JSON round-trips through localStorage (survives restarts) and
//! sessionStorage (tab lifetime). Corrupt or missing entries always
//! fall back to the caller's default, never error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::Storage;

/// Persistence keys. Durable keys live in localStorage, tab-scoped
/// keys in sessionStorage.
pub mod keys {
    // Durable
    pub const CART: &str = "storefront.cart";
    pub const FAVORITES: &str = "storefront.favorites";
    pub const STOCK_ONLY: &str = "storefront.stock_only";
    pub const AUTH_TOKEN: &str = "storefront.auth_token";

    // Tab-scoped
    pub const EXPANDED: &str = "storefront.expanded_categories";
    pub const SELECTED_CATEGORY: &str = "storefront.selected_category";
    pub const SEARCH_TEXT: &str = "storefront.search_text";
    pub const SORT: &str = "storefront.sort";
    pub const FAVORITES_ONLY: &str = "storefront.favorites_only";
}

fn local() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

fn session() -> Option<Storage> {
    web_sys::window()?.session_storage().ok().flatten()
}

fn load<T: DeserializeOwned>(storage: Option<Storage>, key: &str) -> Option<T> {
    let raw = storage?.get_item(key).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

fn save<T: Serialize>(storage: Option<Storage>, key: &str, value: &T) {
    if let (Some(storage), Ok(raw)) = (storage, serde_json::to_string(value)) {
        // Quota or privacy-mode failures are not recoverable here.
        let _ = storage.set_item(key, &raw);
    }
}

pub fn load_local<T: DeserializeOwned>(key: &str) -> Option<T> {
    load(local(), key)
}

pub fn save_local<T: Serialize>(key: &str, value: &T) {
    save(local(), key, value);
}

pub fn load_session<T: DeserializeOwned>(key: &str) -> Option<T> {
    load(session(), key)
}

pub fn save_session<T: Serialize>(key: &str, value: &T) {
    save(session(), key, value);
}

/// Raw (non-JSON) read; the auth token is written by the login flow,
/// not by this crate.
pub fn raw_local(key: &str) -> Option<String> {
    local()?.get_item(key).ok().flatten()
}
