//! Filter Bar Component
//!
//! Stock toggle, favorites-only toggle and sort order controls.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::AppContext;
use crate::models::SortKey;

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <div class="filter-bar">
            <label class="filter-toggle">
                <input
                    type="checkbox"
                    prop:checked=move || ctx.in_stock_only.get()
                    on:change=move |ev| {
                        let target = ev.target().unwrap();
                        let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                        ctx.set_stock_only(input.checked());
                    }
                />
                "In stock only"
            </label>

            <button
                class=move || if ctx.favorites_only.get() { "favorites-btn active" } else { "favorites-btn" }
                on:click=move |_| ctx.set_favorites_only(!ctx.favorites_only.get())
            >
                "★ Favorites"
            </button>

            <select
                class="sort-select"
                on:change=move |ev| {
                    let target = ev.target().unwrap();
                    let select = target.dyn_ref::<web_sys::HtmlSelectElement>().unwrap();
                    ctx.set_sort(SortKey::from_str(&select.value()));
                }
            >
                {SortKey::ALL.iter().map(|(key, label)| {
                    let key = *key;
                    view! {
                        <option
                            value=key.as_str()
                            selected=move || ctx.sort_key.get() == key
                        >
                            {*label}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}
