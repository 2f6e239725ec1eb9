//! # client
//!
//! Leptos + WASM frontend for Gentle Motion.
//!
//! This crate contains pages, components, session state, REST types, and the
//! browser adapters (`localStorage`, live document) that plug into the
//! `prefs` crate's store and presentation seams.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
