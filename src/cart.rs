//! Cart Line-Item Reducer
//!
//! Pure mutations over the cart collection. Invariants held after
//! every call: at most one line per product id, and for every present
//! line `0 < quantity <= stock_quantity`. A quantity clamped to zero
//! or below removes the line. Clamping is silent.

use crate::models::{CartItem, ProductSummary};

fn clamp_quantity(quantity: f64, stock_quantity: f64) -> f64 {
    quantity.min(stock_quantity)
}

/// Insert `quantity` of `product`, or increment the existing line.
/// The resulting quantity is clamped to the product's stock.
pub fn add_item(items: &mut Vec<CartItem>, product: &ProductSummary, quantity: f64) {
    if let Some(pos) = items.iter().position(|i| i.product_id == product.id) {
        let next = clamp_quantity(items[pos].quantity + quantity, items[pos].stock_quantity);
        if next > 0.0 {
            items[pos].quantity = next;
        } else {
            items.remove(pos);
        }
        return;
    }
    let next = clamp_quantity(quantity, product.stock_quantity);
    if next > 0.0 {
        items.push(CartItem::from_product(product, next));
    }
}

/// Set a line's quantity directly, clamped to its stock. Zero or below
/// removes the line; an absent id is a no-op.
pub fn set_quantity(items: &mut Vec<CartItem>, product_id: u32, quantity: f64) {
    let Some(pos) = items.iter().position(|i| i.product_id == product_id) else {
        return;
    };
    let next = clamp_quantity(quantity, items[pos].stock_quantity);
    if next > 0.0 {
        items[pos].quantity = next;
    } else {
        items.remove(pos);
    }
}

/// Remove a line unconditionally. Idempotent.
pub fn remove_item(items: &mut Vec<CartItem>, product_id: u32) {
    items.retain(|i| i.product_id != product_id);
}

pub fn clear(items: &mut Vec<CartItem>) {
    items.clear();
}

/// Sum of all quantities; fractional for weighted lines.
pub fn total_items(items: &[CartItem]) -> f64 {
    items.iter().map(|i| i.quantity).sum()
}

/// Sum of `unit_price * quantity`. Non-finite prices contribute 0 so
/// the total always renders.
pub fn total_price(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|i| {
            if i.unit_price.is_finite() {
                i.unit_price * i.quantity
            } else {
                0.0
            }
        })
        .sum()
}

/// Current quantity for a product, 0 when absent.
pub fn quantity_of(items: &[CartItem], product_id: u32) -> f64 {
    items
        .iter()
        .find(|i| i.product_id == product_id)
        .map(|i| i.quantity)
        .unwrap_or(0.0)
}

/// Display formatting for a quantity. Discrete units render as a
/// floored integer, weighted units to three decimals. Presentation
/// only; stored precision is untouched.
pub fn format_quantity(quantity: f64, weighted: bool) -> String {
    if weighted {
        format!("{:.3}", quantity)
    } else {
        format!("{}", quantity.floor() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, stock_quantity: f64) -> ProductSummary {
        ProductSummary {
            id,
            name: format!("Product {}", id),
            price: 10.0,
            currency: "EUR".to_string(),
            unit: "piece".to_string(),
            in_stock: stock_quantity > 0.0,
            stock_quantity,
            weighted: false,
            image_url: None,
        }
    }

    #[test]
    fn test_add_clamps_to_stock_and_zero_removes() {
        let mut items = Vec::new();
        add_item(&mut items, &product(1, 3.0), 5.0);
        assert_eq!(quantity_of(&items, 1), 3.0);

        set_quantity(&mut items, 1, 0.0);
        assert!(items.is_empty());
        assert_eq!(quantity_of(&items, 1), 0.0);
    }

    #[test]
    fn test_adding_twice_merges_into_one_line() {
        let mut items = Vec::new();
        let p = product(7, 10.0);
        add_item(&mut items, &p, 2.0);
        add_item(&mut items, &p, 3.0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 5.0);
    }

    #[test]
    fn test_quantity_never_exceeds_stock_nor_goes_negative() {
        let mut items = Vec::new();
        let p = product(2, 4.0);
        add_item(&mut items, &p, 1.0);
        for _ in 0..10 {
            add_item(&mut items, &p, 1.0);
        }
        assert_eq!(quantity_of(&items, 2), 4.0);

        set_quantity(&mut items, 2, -3.0);
        assert!(items.is_empty());
    }

    #[test]
    fn test_out_of_stock_product_is_not_added() {
        let mut items = Vec::new();
        add_item(&mut items, &product(3, 0.0), 1.0);
        assert!(items.is_empty());
    }

    #[test]
    fn test_set_quantity_on_absent_id_is_noop() {
        let mut items = Vec::new();
        set_quantity(&mut items, 42, 3.0);
        assert!(items.is_empty());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut items = Vec::new();
        add_item(&mut items, &product(5, 2.0), 1.0);
        remove_item(&mut items, 5);
        remove_item(&mut items, 5);
        assert!(items.is_empty());
    }

    #[test]
    fn test_totals_recompute_from_scratch() {
        let mut items = Vec::new();
        add_item(&mut items, &product(1, 10.0), 2.0);
        let mut weighted = product(2, 5.0);
        weighted.weighted = true;
        weighted.unit = "kg".to_string();
        weighted.price = 4.0;
        add_item(&mut items, &weighted, 1.5);

        assert_eq!(total_items(&items), 3.5);
        assert_eq!(total_price(&items), 2.0 * 10.0 + 1.5 * 4.0);

        set_quantity(&mut items, 1, 1.0);
        assert_eq!(total_items(&items), 2.5);

        clear(&mut items);
        assert_eq!(total_items(&items), 0.0);
        assert_eq!(total_price(&items), 0.0);
    }

    #[test]
    fn test_non_finite_price_contributes_zero() {
        let mut items = Vec::new();
        add_item(&mut items, &product(1, 5.0), 2.0);
        items[0].unit_price = f64::NAN;
        assert_eq!(total_price(&items), 0.0);
        assert!(total_price(&items).is_finite());
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(2.0, false), "2");
        assert_eq!(format_quantity(2.9, false), "2");
        assert_eq!(format_quantity(0.5, true), "0.500");
        assert_eq!(format_quantity(1.25, true), "1.250");
    }

    #[test]
    fn test_cart_serde_round_trip() {
        let mut items = Vec::new();
        add_item(&mut items, &product(1, 10.0), 2.0);
        let mut weighted = product(2, 5.0);
        weighted.weighted = true;
        add_item(&mut items, &weighted, 0.75);

        let raw = serde_json::to_string(&items).unwrap();
        let restored: Vec<CartItem> = serde_json::from_str(&raw).unwrap();
        assert_eq!(restored, items);
        assert_eq!(total_items(&restored), total_items(&items));
        assert_eq!(total_price(&restored), total_price(&items));
    }
}
