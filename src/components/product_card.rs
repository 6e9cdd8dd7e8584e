//! Product Card Component
//!
//! One product in the grid: image, price, favorite star and the cart
//! controls. The add button is disabled for out-of-stock products;
//! once in the cart the card shows a quantity stepper instead.

use leptos::prelude::*;

use crate::cart::format_quantity;
use crate::models::ProductSummary;
use crate::store::{self, use_shop_store};

#[component]
pub fn ProductCard(product: ProductSummary) -> impl IntoView {
    let shop = use_shop_store();

    let id = product.id;
    let weighted = product.weighted;
    let unit = product.unit.clone();
    let step = if weighted { 0.1 } else { 1.0 };
    let available = product.in_stock && product.stock_quantity > 0.0;
    let price_label = format!("{:.2} {}", product.price, product.currency);

    let quantity = move || store::cart_quantity(&shop, id);
    let in_cart = move || quantity() > 0.0;
    let is_favorite = move || store::is_favorite(&shop, id);

    let product_for_add = product.clone();
    let add_to_cart = move |_| {
        store::store_add_to_cart(&shop, &product_for_add, 1.0);
    };

    view! {
        <div class="product-card" class:out-of-stock=!available>
            <div class="product-image">
                {match product.image_url.clone() {
                    Some(url) => view! { <img src=url alt=product.name.clone() /> }.into_any(),
                    None => view! { <div class="image-placeholder"></div> }.into_any(),
                }}
                <button
                    class=move || if is_favorite() { "favorite-btn active" } else { "favorite-btn" }
                    on:click=move |_| store::store_toggle_favorite(&shop, id)
                >
                    {move || if is_favorite() { "★" } else { "☆" }}
                </button>
            </div>

            <div class="product-name">{product.name.clone()}</div>
            <div class="product-price">{price_label}</div>

            <Show when=move || !available>
                <div class="stock-badge">"Out of stock"</div>
            </Show>

            <div class="product-controls">
                {move || if in_cart() {
                    let unit = unit.clone();
                    view! {
                        <div class="quantity-stepper">
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
                        </div>
                    }.into_any()
                } else {
                    view! {
                        <button
                            class="add-to-cart-btn"
                            disabled=!available
                            on:click=add_to_cart.clone()
                        >
                            "Add to cart"
                        </button>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
