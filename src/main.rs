#![allow(warnings)]
//! Storefront Frontend Entry Point

mod api;
mod app;
mod cart;
mod catalog;
mod components;
mod context;
mod models;
mod storage;
mod store;
mod tree;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
