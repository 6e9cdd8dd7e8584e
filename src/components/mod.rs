//! UI Components
//!
//! Reusable Leptos components.

mod cart_panel;
mod category_tree;
mod filter_bar;
mod product_card;
mod product_list;
mod search_bar;

pub use cart_panel::CartPanel;
pub use category_tree::CategoryTree;
pub use filter_bar::FilterBar;
pub use product_card::ProductCard;
pub use product_list::ProductList;
pub use search_bar::SearchBar;
