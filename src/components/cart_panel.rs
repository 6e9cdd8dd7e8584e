//! Cart Panel Component
//!
//! Right-hand column showing the cart line items and derived totals.
//! All quantity edits funnel through the store helpers, so the same
//! clamping applies here as on the product cards.

use leptos::prelude::*;

use crate::api;
use crate::cart::format_quantity;
use crate::models::CartItem;
use crate::store::{self, use_shop_store};

#[component]
pub fn CartPanel() -> impl IntoView {
    let shop = use_shop_store();

    let items = move || store::cart_items(&shop);
    let is_empty = move || items().is_empty();
    let total_items = move || store::cart_total_items(&shop);
    let total_price = move || store::cart_total_price(&shop);
    let currency = move || {
        items()
            .first()
            .map(|item| item.currency.clone())
            .unwrap_or_default()
    };

    view! {
        <div class="cart-column">
            <div class="cart-column-header">
                "Cart"
                <Show when=move || !is_empty()>
                    <button class="clear-cart-btn" on:click=move |_| store::store_clear_cart(&shop)>
                        "Clear"
                    </button>
                </Show>
            </div>

            <Show
                when=move || !is_empty()
                fallback=|| view! { <div class="cart-empty">"Your cart is empty"</div> }
            >
                <div class="cart-items">
                    <For
                        each=items
                        key=|item| item.product_id
                        children=move |item| {
                            view! { <CartLine item=item /> }
                        }
                    />
                </div>

                <div class="cart-footer">
                    <div class="cart-total-items">{move || format!("{} items", total_items())}</div>
                    <div class="cart-total-price">
                        {move || format!("{:.2} {}", total_price(), currency())}
                    </div>
                    {if api::is_authenticated() {
                        view! { <button class="checkout-btn">"Checkout"</button> }.into_any()
                    } else {
                        view! { <div class="checkout-hint">"Sign in to check out"</div> }.into_any()
                    }}
                </div>
            </Show>
        </div>
    }
}

/// A single cart line with stepper and remove controls
#[component]
fn CartLine(item: CartItem) -> impl IntoView {
    let shop = use_shop_store();

    let id = item.product_id;
    let weighted = item.weighted;
    let unit = item.unit.clone();
    let currency = item.currency.clone();
    let step = if weighted { 0.1 } else { 1.0 };
    let unit_price = if item.unit_price.is_finite() { item.unit_price } else { 0.0 };

    let quantity = move || store::cart_quantity(&shop, id);
    let line_total = move || format!("{:.2} {}", unit_price * quantity(), currency);

    view! {
        <div class="cart-line">
            <div class="cart-line-info">
                <span class="cart-line-name">{item.name.clone()}</span>
                <span class="cart-line-total">{line_total}</span>
            </div>
            <div class="cart-line-controls">
                <button
                    class="step-btn"
                    on:click=move |_| store::store_adjust_quantity(&shop, id, -step)
                >
                    "−"
                </button>
                <span class="quantity-label">
                    {move || format_quantity(quantity(), weighted)}
                    " "
                    {unit.clone()}
                </span>
                <button
                    class="step-btn"
                    on:click=move |_| store::store_adjust_quantity(&shop, id, step)
                >
                    "+"
                </button>
                <button
                    class="remove-btn"
                    on:click=move |_| store::store_remove_item(&shop, id)
                >
                    "×"
                </button>
            </div>
        </div>
    }
}
