//! Frontend Models
//!
//! Data structures matching the catalog backend's wire format (camelCase
//! JSON) plus the locally persisted cart line item.

use serde::{Deserialize, Deserializer, Serialize};

/// Catalog category node. The backend delivers the whole tree in one
/// response; `children` are owned by their parent, no sharing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    #[serde(rename = "displayName")]
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<u32>,
    #[serde(default)]
    pub children: Vec<Category>,
    /// Advisory count, recomputed server-side under the active stock filter.
    #[serde(default)]
    pub product_count: u32,
}

/// One product as it appears in a catalog listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: u32,
    pub name: String,
    #[serde(deserialize_with = "de_price", default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: f64,
    /// Sold by continuous quantity (weight) rather than discrete count.
    #[serde(default)]
    pub weighted: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_unit() -> String {
    "piece".to_string()
}

/// Price arrives as a JSON number or a decimal string depending on the
/// backend serializer. Malformed values become 0.0 so totals stay
/// renderable, never NaN.
fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(normalize_price(&value))
}

/// Coerce a raw JSON price value to a finite f64, defaulting to 0.0.
pub fn normalize_price(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// One page of catalog results with the continuation cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<ProductSummary>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub total_count: u32,
}

/// Catalog sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// Options in display order: (key, label).
    pub const ALL: &'static [(SortKey, &'static str)] = &[
        (SortKey::Default, "Recommended"),
        (SortKey::PriceAsc, "Price: low to high"),
        (SortKey::PriceDesc, "Price: high to low"),
        (SortKey::NameAsc, "Name: A to Z"),
        (SortKey::NameDesc, "Name: Z to A"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "name-asc" => SortKey::NameAsc,
            "name-desc" => SortKey::NameDesc,
            _ => SortKey::Default,
        }
    }
}

/// The full tuple that determines one paginated result sequence.
/// Two equal criteria values are the same filter configuration; any
/// field change restarts pagination from the first page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub category_id: Option<u32>,
    pub search_text: String,
    pub in_stock_only: bool,
    pub sort_key: SortKey,
    pub favorites_only: bool,
    /// Only populated while `favorites_only` is active, so favorite
    /// edits outside that mode don't invalidate the configuration.
    pub favorite_ids: Vec<u32>,
}

/// A cart line item, persisted durably after every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: u32,
    pub name: String,
    pub unit_price: f64,
    pub currency: String,
    pub quantity: f64,
    /// Clamping ceiling captured at add time.
    pub stock_quantity: f64,
    pub weighted: bool,
    pub unit: String,
    pub image_url: Option<String>,
}

impl CartItem {
    pub fn from_product(product: &ProductSummary, quantity: f64) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            currency: product.currency.clone(),
            quantity,
            stock_quantity: product.stock_quantity,
            weighted: product.weighted,
            unit: product.unit.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_accepts_number_and_string() {
        let p: ProductSummary =
            serde_json::from_str(r#"{"id":1,"name":"Milk","price":12.5}"#).unwrap();
        assert_eq!(p.price, 12.5);

        let p: ProductSummary =
            serde_json::from_str(r#"{"id":2,"name":"Bread","price":"49.90"}"#).unwrap();
        assert_eq!(p.price, 49.90);
    }

    #[test]
    fn test_malformed_price_becomes_zero() {
        let p: ProductSummary =
            serde_json::from_str(r#"{"id":3,"name":"Eggs","price":"not a price"}"#).unwrap();
        assert_eq!(p.price, 0.0);

        let p: ProductSummary =
            serde_json::from_str(r#"{"id":4,"name":"Salt","price":null}"#).unwrap();
        assert_eq!(p.price, 0.0);
    }

    #[test]
    fn test_sort_key_round_trip() {
        for (key, _) in SortKey::ALL {
            assert_eq!(SortKey::from_str(key.as_str()), *key);
        }
        assert_eq!(SortKey::from_str("garbage"), SortKey::Default);
    }

    #[test]
    fn test_criteria_equality_is_configuration_identity() {
        let a = FilterCriteria {
            category_id: Some(7),
            search_text: "бас".to_string(),
            ..Default::default()
        };
        let mut b = a.clone();
        assert_eq!(a, b);
        b.sort_key = SortKey::PriceAsc;
        assert_ne!(a, b);
    }
}
