//! Global Shop State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The cart
//! collection and the favorite id set are the two client-owned mutable
//! collections; every mutation goes through a helper here that applies
//! the invariant-enforcing cart op and immediately persists the new
//! collection, so a sibling read anywhere in the UI sees a consistent
//! cart.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::cart;
use crate::models::{CartItem, ProductSummary};
use crate::storage::{self, keys};

/// Durable client state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct ShopState {
    /// Cart line items, insertion order
    pub cart_items: Vec<CartItem>,
    /// Favorite product ids, insertion order
    pub favorite_ids: Vec<u32>,
}

impl ShopState {
    /// Rehydrate from durable storage. Malformed or missing data
    /// yields empty collections.
    pub fn restore() -> Self {
        Self {
            cart_items: storage::load_local(keys::CART).unwrap_or_default(),
            favorite_ids: storage::load_local(keys::FAVORITES).unwrap_or_default(),
        }
    }
}

/// Type alias for the store
pub type ShopStore = Store<ShopState>;

/// Get the shop store from context
pub fn use_shop_store() -> ShopStore {
    expect_context::<ShopStore>()
}

fn persist_cart(store: &ShopStore) {
    storage::save_local(keys::CART, &store.cart_items().get_untracked());
}

fn persist_favorites(store: &ShopStore) {
    storage::save_local(keys::FAVORITES, &store.favorite_ids().get_untracked());
}

// ========================
// Cart Mutations
// ========================

/// Add a product to the cart (or increment its line), then persist.
pub fn store_add_to_cart(store: &ShopStore, product: &ProductSummary, quantity: f64) {
    {
        let field = store.cart_items();
        let mut items = field.write();
        cart::add_item(&mut items, product, quantity);
    }
    persist_cart(store);
}

/// Set a line's quantity directly, then persist.
pub fn store_set_quantity(store: &ShopStore, product_id: u32, quantity: f64) {
    {
        let field = store.cart_items();
        let mut items = field.write();
        cart::set_quantity(&mut items, product_id, quantity);
    }
    persist_cart(store);
}

/// Step a line's quantity by `delta` (stepper buttons), then persist.
pub fn store_adjust_quantity(store: &ShopStore, product_id: u32, delta: f64) {
    let current = cart::quantity_of(&store.cart_items().get_untracked(), product_id);
    if current <= 0.0 {
        return;
    }
    store_set_quantity(store, product_id, current + delta);
}

/// Remove a line unconditionally, then persist.
pub fn store_remove_item(store: &ShopStore, product_id: u32) {
    {
        let field = store.cart_items();
        let mut items = field.write();
        cart::remove_item(&mut items, product_id);
    }
    persist_cart(store);
}

/// Empty the cart, then persist.
pub fn store_clear_cart(store: &ShopStore) {
    {
        let field = store.cart_items();
        let mut items = field.write();
        cart::clear(&mut items);
    }
    persist_cart(store);
}

// ========================
// Favorites
// ========================

/// Flip a product's membership in the favorite set, then persist.
pub fn store_toggle_favorite(store: &ShopStore, product_id: u32) {
    {
        let field = store.favorite_ids();
        let mut ids = field.write();
        if let Some(pos) = ids.iter().position(|id| *id == product_id) {
            ids.remove(pos);
        } else {
            ids.push(product_id);
        }
    }
    persist_favorites(store);
}

// ========================
// Reactive Reads
// ========================

pub fn cart_items(store: &ShopStore) -> Vec<CartItem> {
    store.cart_items().get()
}

pub fn cart_quantity(store: &ShopStore, product_id: u32) -> f64 {
    cart::quantity_of(&store.cart_items().get(), product_id)
}

pub fn cart_total_items(store: &ShopStore) -> f64 {
    cart::total_items(&store.cart_items().get())
}

pub fn cart_total_price(store: &ShopStore) -> f64 {
    cart::total_price(&store.cart_items().get())
}

pub fn is_favorite(store: &ShopStore, product_id: u32) -> bool {
    store.favorite_ids().get().contains(&product_id)
}

pub fn favorite_ids(store: &ShopStore) -> Vec<u32> {
    store.favorite_ids().get()
}
