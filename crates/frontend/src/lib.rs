pub mod app;
pub mod domain;
pub mod layout;
pub mod shared;

use leptos::task::spawn_local;
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    // Pages build their endpoints from the API base, so resolve it first
    spawn_local(async {
        let base = shared::api_utils::init_api_base().await;
        log::debug!("Mounting admin UI against {}", base);
        leptos::mount::mount_to_body(app::App);
    });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
