//! Storefront Frontend App
//!
//! Main application component with three-column layout: category tree,
//! catalog, cart.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::components::{CartPanel, CategoryTree, FilterBar, ProductList, SearchBar};
use crate::context::AppContext;
use crate::store::ShopState;

#[component]
pub fn App() -> impl IntoView {
    // Filter criteria and expansion state, rehydrated per scope
    // (session for the criteria, durable for the stock preference).
    let ctx = AppContext::restore();
    provide_context(ctx);

    // Cart and favorites, rehydrated from durable storage.
    let shop = Store::new(ShopState::restore());
    provide_context(shop);

    view! {
        <div class="app-layout">
            // Left: category tree
            <CategoryTree />

            // Center: catalog
            <main class="main-content">
                <SearchBar />
                <FilterBar />
                <ProductList />
            </main>

            // Right: cart
            <CartPanel />
        </div>
    }
}
