//! Application Context
//!
//! Filter-criteria signals provided via Leptos Context API. Every
//! setter also writes the matching persistence key: the in-stock
//! preference is durable, the rest of the criteria and the expansion
//! set live for the tab only.

use std::collections::HashSet;

use leptos::prelude::*;

use crate::models::SortKey;
use crate::storage::{self, keys};

/// App-wide filter signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Active category filter (None = all products) - read
    pub selected_category: ReadSignal<Option<u32>>,
    set_selected_category: WriteSignal<Option<u32>>,
    /// Committed (debounced) search text - read
    pub search_text: ReadSignal<String>,
    set_search_text: WriteSignal<String>,
    /// Durable in-stock-only preference - read
    pub in_stock_only: ReadSignal<bool>,
    set_in_stock_only: WriteSignal<bool>,
    /// Catalog sort order - read
    pub sort_key: ReadSignal<SortKey>,
    set_sort_key: WriteSignal<SortKey>,
    /// Favorites-only mode - read
    pub favorites_only: ReadSignal<bool>,
    set_favorites_only: WriteSignal<bool>,
    /// Expanded category ids
    pub expanded_ids: RwSignal<HashSet<u32>>,
}

impl AppContext {
    /// Build the context from persisted state.
    pub fn restore() -> Self {
        let (selected_category, set_selected_category) =
            signal(storage::load_session::<Option<u32>>(keys::SELECTED_CATEGORY).unwrap_or(None));
        let (search_text, set_search_text) =
            signal(storage::load_session::<String>(keys::SEARCH_TEXT).unwrap_or_default());
        let (in_stock_only, set_in_stock_only) =
            signal(storage::load_local::<bool>(keys::STOCK_ONLY).unwrap_or(false));
        let (sort_key, set_sort_key) =
            signal(storage::load_session::<SortKey>(keys::SORT).unwrap_or_default());
        let (favorites_only, set_favorites_only) =
            signal(storage::load_session::<bool>(keys::FAVORITES_ONLY).unwrap_or(false));
        let expanded_ids =
            RwSignal::new(storage::load_session::<HashSet<u32>>(keys::EXPANDED).unwrap_or_default());

        Self {
            selected_category,
            set_selected_category,
            search_text,
            set_search_text,
            in_stock_only,
            set_in_stock_only,
            sort_key,
            set_sort_key,
            favorites_only,
            set_favorites_only,
            expanded_ids,
        }
    }

    /// Select a category filter (None = all products)
    pub fn select_category(&self, id: Option<u32>) {
        self.set_selected_category.set(id);
        storage::save_session(keys::SELECTED_CATEGORY, &id);
    }

    /// Commit an effective search text (after debounce)
    pub fn commit_search(&self, text: String) {
        storage::save_session(keys::SEARCH_TEXT, &text);
        self.set_search_text.set(text);
    }

    pub fn set_stock_only(&self, value: bool) {
        self.set_in_stock_only.set(value);
        storage::save_local(keys::STOCK_ONLY, &value);
    }

    pub fn set_sort(&self, key: SortKey) {
        self.set_sort_key.set(key);
        storage::save_session(keys::SORT, &key);
    }

    pub fn set_favorites_only(&self, value: bool) {
        self.set_favorites_only.set(value);
        storage::save_session(keys::FAVORITES_ONLY, &value);
    }

    /// Flip one category's expansion state
    pub fn toggle_expanded(&self, id: u32) {
        self.expanded_ids.update(|set| {
            if !set.remove(&id) {
                set.insert(id);
            }
        });
        self.persist_expanded();
    }

    /// Open every id on a root-to-selection path (the selection itself
    /// is not auto-added, so manual collapse is not fought).
    pub fn expand_ancestors(&self, path: &[u32]) {
        if path.is_empty() {
            return;
        }
        self.expanded_ids.update(|set| {
            set.extend(path.iter().copied());
        });
        self.persist_expanded();
    }

    fn persist_expanded(&self) {
        storage::save_session(keys::EXPANDED, &self.expanded_ids.get_untracked());
    }
}
