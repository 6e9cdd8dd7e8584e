//! Category Tree Component
//!
//! Left sidebar with the collapsible category hierarchy. The tree is
//! fetched once per stock-filter dimension; toggling any other filter
//! reuses the loaded snapshot. Selecting a node opens the path leading
//! to it.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::AppContext;
use crate::models::Category;
use crate::tree;

#[component]
pub fn CategoryTree() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (roots, set_roots) = signal(Vec::<Category>::new());
    let (loading, set_loading) = signal(false);
    let (load_failed, set_load_failed) = signal(false);
    let (retry_tick, set_retry_tick) = signal(0u32);

    // Reload only when the stock dimension (or an explicit retry)
    // changes. A failed load leaves the previous selection alone; the
    // product list keeps operating without the tree.
    Effect::new(move |_| {
        let stock_only = ctx.in_stock_only.get();
        let _ = retry_tick.get();
        set_loading.set(true);
        set_load_failed.set(false);
        spawn_local(async move {
            match api::fetch_category_tree(stock_only).await {
                Ok(tree_roots) => {
                    // A selection that vanished with the refetch would
                    // silently filter to nothing; drop it.
                    if let Some(selected) = ctx.selected_category.get_untracked() {
                        if !tree::contains_category(&tree_roots, selected) {
                            ctx.select_category(None);
                        }
                    }
                    set_roots.set(tree_roots);
                }
                Err(err) => {
                    web_sys::console::warn_1(&format!("[TREE] load failed: {}", err).into());
                    set_load_failed.set(true);
                }
            }
            set_loading.set(false);
        });
    });

    let select = move |id: Option<u32>| {
        ctx.select_category(id);
        if let Some(id) = id {
            if let Some(path) = tree::find_ancestor_path(&roots.get_untracked(), id) {
                ctx.expand_ancestors(&path);
            }
        }
    };

    let all_selected = move || ctx.selected_category.get().is_none();

    view! {
        <div class="category-column">
            <div class="category-column-header">"Categories"</div>

            <Show
                when=move || !load_failed.get()
                fallback=move || view! {
                    <div class="category-error">
                        <p>"Could not load categories"</p>
                        <button class="retry-btn" on:click=move |_| set_retry_tick.update(|v| *v += 1)>
                            "Retry"
                        </button>
                    </div>
                }
            >
                <div class="category-tree">
                    <div
                        class=move || if all_selected() { "category-row selected" } else { "category-row" }
                        on:click=move |_| select(None)
                    >
                        <span class="category-expand-placeholder">"·"</span>
                        <span class="category-name">"All products"</span>
                    </div>

                    <For
                        each=move || roots.get()
                        key=|category| category.id
                        children=move |category| {
                            view! {
                                <CategoryNode
                                    category=category
                                    depth=0
                                    on_select=Callback::new(select)
                                />
                            }
                        }
                    />
                </div>

                <Show when=move || loading.get()>
                    <div class="loading small">"Loading..."</div>
                </Show>
            </Show>
        </div>
    }
}

/// Recursive category row
#[component]
fn CategoryNode(
    category: Category,
    depth: usize,
    #[prop(into)] on_select: Callback<Option<u32>>,
) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = category.id;
    let has_children = !category.children.is_empty();
    let children = category.children.clone();
    let indent = depth * 16;

    let expanded = move || ctx.expanded_ids.with(|set| set.contains(&id));
    let is_selected = move || ctx.selected_category.get() == Some(id);

    view! {
        <div class="category-tree-item">
            <div
                class=move || if is_selected() { "category-row selected" } else { "category-row" }
                style=format!("padding-left: {}px;", indent + 8)
                on:click=move |_| on_select.run(Some(id))
            >
                {if has_children {
                    view! {
                        <button
                            class="category-expand-btn"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                ctx.toggle_expanded(id);
                            }
                        >
                            {move || if expanded() { "▼" } else { "▶" }}
                        </button>
                    }.into_any()
                } else {
                    view! { <span class="category-expand-placeholder">"·"</span> }.into_any()
                }}

                <span class="category-name">{category.name.clone()}</span>
                <span class="category-count">{category.product_count}</span>
            </div>

            // Children (recursive)
            {move || if has_children && expanded() {
                let child_list = children.clone();
                view! {
                    <div class="category-tree-children">
                        <For
                            each=move || child_list.clone()
                            key=|child| child.id
                            children=move |child| {
                                view! {
                                    <CategoryNode
                                        category=child
                                        depth=depth + 1
                                        on_select=on_select
                                    />
                                }
                            }
                        />
                    </div>
                }.into_any()
            } else {
                view! { <div></div> }.into_any()
            }}
        </div>
    }
}
