//! Backend API Wrappers
//!
//! Thin async bindings over the browser fetch API. Requests are
//! idempotent reads and are never cancelled; callers detect stale
//! responses by configuration tag instead.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::models::{Category, FilterCriteria, ProductPage, ProductSummary};
use crate::storage;

const API_BASE: &str = "/api";

/// Errors surfaced by the fetch collaborator.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (offline, DNS, aborted).
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),

    /// Response body could not be decoded.
    #[error("response decoding failed: {0}")]
    Decode(String),
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| ApiError::Network(js_message(&e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| ApiError::Network("fetch returned a non-Response value".to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let body = JsFuture::from(
        response
            .json()
            .map_err(|e| ApiError::Decode(js_message(&e)))?,
    )
    .await
    .map_err(|e| ApiError::Decode(js_message(&e)))?;

    serde_wasm_bindgen::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Fetch the whole category tree. The only filter dimension the tree
/// depends on is the stock flag; everything else must not refetch it.
pub async fn fetch_category_tree(in_stock_only: bool) -> Result<Vec<Category>, ApiError> {
    fetch_json(&format!("{API_BASE}/categories?in_stock={in_stock_only}")).await
}

/// Fetch one page of products for a filter configuration.
pub async fn fetch_product_page(
    criteria: &FilterCriteria,
    cursor: Option<&str>,
) -> Result<ProductPage, ApiError> {
    fetch_json(&product_page_url(criteria, cursor)).await
}

/// Fetch an explicit, bounded product list by id, backing the
/// favorites-only mode. One call, no pagination.
pub async fn fetch_products_by_ids(ids: &[u32]) -> Result<Vec<ProductSummary>, ApiError> {
    let joined = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");
    fetch_json(&format!("{API_BASE}/products/batch?ids={joined}")).await
}

/// Token-presence check consumed by checkout-adjacent UI. The token
/// itself is owned by the login flow.
pub fn is_authenticated() -> bool {
    storage::raw_local(storage::keys::AUTH_TOKEN)
        .map(|token| !token.trim().is_empty())
        .unwrap_or(false)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

fn product_page_url(criteria: &FilterCriteria, cursor: Option<&str>) -> String {
    let mut params: Vec<String> = Vec::new();
    if let Some(category_id) = criteria.category_id {
        params.push(format!("category={category_id}"));
    }
    if !criteria.search_text.is_empty() {
        params.push(format!("search={}", encode(&criteria.search_text)));
    }
    if criteria.in_stock_only {
        params.push("in_stock=true".to_string());
    }
    if criteria.sort_key != crate::models::SortKey::Default {
        params.push(format!("sort={}", criteria.sort_key.as_str()));
    }
    if let Some(cursor) = cursor {
        params.push(format!("cursor={}", encode(cursor)));
    }
    if params.is_empty() {
        format!("{API_BASE}/products")
    } else {
        format!("{API_BASE}/products?{}", params.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortKey;

    #[test]
    fn test_product_page_url_plain() {
        let criteria = FilterCriteria::default();
        assert_eq!(product_page_url(&criteria, None), "/api/products");
    }

    #[test]
    fn test_product_page_url_full() {
        let criteria = FilterCriteria {
            category_id: Some(12),
            search_text: "dark chocolate".to_string(),
            in_stock_only: true,
            sort_key: SortKey::PriceAsc,
            ..Default::default()
        };
        let url = product_page_url(&criteria, Some("page-2"));
        assert_eq!(
            url,
            "/api/products?category=12&search=dark%20chocolate&in_stock=true&sort=price-asc&cursor=page%2D2"
        );
    }

    #[test]
    fn test_search_text_is_percent_encoded() {
        let criteria = FilterCriteria {
            search_text: "бас".to_string(),
            ..Default::default()
        };
        let url = product_page_url(&criteria, None);
        assert_eq!(url, "/api/products?search=%D0%B1%D0%B0%D1%81");
    }
}
