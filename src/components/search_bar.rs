//! Search Bar Component
//!
//! Free-text search with a quiet-period debounce. Keystrokes update a
//! local raw signal only; the value is committed to the filter
//! criteria after 500 ms without further edits, so rapid typing
//! produces at most one effective filter change per quiet period.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::AppContext;

const SEARCH_DEBOUNCE_MS: u32 = 500;

#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (raw_text, set_raw_text) = signal(ctx.search_text.get_untracked());
    // Each edit bumps the epoch; a sleeping committer whose epoch no
    // longer matches was superseded by a later keystroke.
    let epoch = StoredValue::new(0u32);

    let schedule_commit = move |value: String| {
        let current = epoch.get_value() + 1;
        epoch.set_value(current);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if epoch.get_value() == current {
                ctx.commit_search(value);
            }
        });
    };

    let commit_now = move |value: String| {
        epoch.set_value(epoch.get_value() + 1);
        ctx.commit_search(value);
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        commit_now(raw_text.get());
    };

    let has_text = move || !raw_text.get().is_empty();

    view! {
        <form class="search-bar" on:submit=on_submit>
            <input
                type="text"
                class="search-input"
                placeholder="Search products..."
                prop:value=move || raw_text.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    let value = input.value();
                    set_raw_text.set(value.clone());
                    schedule_commit(value);
                }
            />
            <Show when=has_text>
                <button
                    type="button"
                    class="search-clear-btn"
                    on:click=move |_| {
                        set_raw_text.set(String::new());
                        commit_now(String::new());
                    }
                >
                    "×"
                </button>
            </Show>
        </form>
    }
}
