//! Product List Component
//!
//! Drives the catalog query state machine: restarts it whenever the
//! filter configuration changes, issues the paginated fetches, and
//! loads the next page when the sentinel below the grid scrolls into
//! view. Stale responses are dropped by the state machine's token
//! check, so an out-of-date fetch can never leak into the grid.

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::api;
use crate::catalog::{CatalogQuery, QueryPhase};
use crate::components::ProductCard;
use crate::context::AppContext;
use crate::models::FilterCriteria;
use crate::store::{self, use_shop_store};

#[component]
pub fn ProductList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let shop = use_shop_store();

    // The full filter configuration. Favorite ids only participate in
    // favorites mode, so starring a product doesn't restart a normal
    // listing.
    let criteria = Memo::new(move |_| FilterCriteria {
        category_id: ctx.selected_category.get(),
        search_text: ctx.search_text.get(),
        in_stock_only: ctx.in_stock_only.get(),
        sort_key: ctx.sort_key.get(),
        favorites_only: ctx.favorites_only.get(),
        favorite_ids: if ctx.favorites_only.get() {
            store::favorite_ids(&shop)
        } else {
            Vec::new()
        },
    });

    let query = RwSignal::new(CatalogQuery::new());
    let (retry_tick, set_retry_tick) = signal(0u32);

    // Any criteria change (or explicit retry) restarts pagination for
    // the new configuration.
    Effect::new(move |_| {
        let _ = retry_tick.get();
        let crit = criteria.get();
        let token = {
            let mut q = query.write();
            q.restart(crit.favorites_only)
        };
        spawn_local(async move {
            run_first_fetch(query, crit, token).await;
        });
    });

    let load_next = move || {
        let claimed = {
            let mut q = query.write();
            q.begin_next_page()
        };
        let Some((token, cursor)) = claimed else {
            return;
        };
        let crit = criteria.get_untracked();
        spawn_local(async move {
            match api::fetch_product_page(&crit, Some(&cursor)).await {
                Ok(page) => query.update(|q| {
                    q.commit_page(token, page);
                }),
                Err(err) => {
                    web_sys::console::warn_1(&format!("[CATALOG] page fetch failed: {}", err).into());
                    query.update(|q| {
                        q.fail(token);
                    });
                }
            }
        });
    };

    // Observe the load-more sentinel. Rebuilt whenever the item list
    // grows so a sentinel still inside the viewport fires again.
    let sentinel_ref = NodeRef::<Div>::new();
    let observer_slot = StoredValue::new_local(None::<web_sys::IntersectionObserver>);
    Effect::new(move |_| {
        let _ = query.with(|q| q.items().len());
        if let Some(old) = observer_slot.get_value() {
            old.disconnect();
            observer_slot.set_value(None);
        }
        let Some(el) = sentinel_ref.get() else {
            return;
        };
        let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                let visible = entries.iter().any(|entry| {
                    entry
                        .unchecked_into::<web_sys::IntersectionObserverEntry>()
                        .is_intersecting()
                });
                if visible {
                    load_next();
                }
            },
        );
        if let Ok(observer) = web_sys::IntersectionObserver::new(callback.as_ref().unchecked_ref())
        {
            observer.observe(&el);
            observer_slot.set_value(Some(observer));
        }
        callback.forget();
    });

    let phase = move || query.with(|q| q.phase());
    let is_initial_loading = move || query.with(|q| q.is_loading() && q.items().is_empty());
    let is_loading_more = move || query.with(|q| q.is_loading() && !q.items().is_empty());
    let is_empty =
        move || matches!(phase(), QueryPhase::Ready { .. }) && query.with(|q| q.items().is_empty());

    view! {
        <div class="product-list">
            <div class="result-count">
                {move || match phase() {
                    QueryPhase::Ready { .. } => format!("{} products", query.with(|q| q.total_count())),
                    _ => String::new(),
                }}
            </div>

            <div class="product-grid">
                <For
                    each=move || query.with(|q| q.items().to_vec())
                    key=|product| product.id
                    children=move |product| {
                        view! { <ProductCard product=product /> }
                    }
                />
            </div>

            <Show when=is_initial_loading>
                <div class="list-status">"Loading products..."</div>
            </Show>
            <Show when=is_loading_more>
                <div class="list-status small">"Loading more..."</div>
            </Show>
            <Show when=is_empty>
                <div class="list-status">"No products match the current filters"</div>
            </Show>
            <Show when=move || phase() == QueryPhase::Failed>
                <div class="list-status error">
                    <p>"Could not load products"</p>
                    <button class="retry-btn" on:click=move |_| set_retry_tick.update(|v| *v += 1)>
                        "Retry"
                    </button>
                </div>
            </Show>

            <Show when=move || query.with(|q| q.can_load_more())>
                <div class="load-more-sentinel" node_ref=sentinel_ref></div>
            </Show>
        </div>
    }
}

/// First fetch for a freshly restarted configuration. Favorites mode
/// swaps the source of the id universe: one bounded batch call
/// instead of open-ended pagination.
async fn run_first_fetch(query: RwSignal<CatalogQuery>, criteria: FilterCriteria, token: u64) {
    if criteria.favorites_only {
        if criteria.favorite_ids.is_empty() {
            query.update(|q| {
                q.commit_bounded(token, Vec::new());
            });
            return;
        }
        match api::fetch_products_by_ids(&criteria.favorite_ids).await {
            Ok(items) => query.update(|q| {
                q.commit_bounded(token, items);
            }),
            Err(err) => {
                web_sys::console::warn_1(&format!("[CATALOG] favorites fetch failed: {}", err).into());
                query.update(|q| {
                    q.fail(token);
                });
            }
        }
        return;
    }

    match api::fetch_product_page(&criteria, None).await {
        Ok(page) => query.update(|q| {
            q.commit_page(token, page);
        }),
        Err(err) => {
            web_sys::console::warn_1(&format!("[CATALOG] page fetch failed: {}", err).into());
            query.update(|q| {
                q.fail(token);
            });
        }
    }
}
