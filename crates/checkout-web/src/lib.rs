//! Credit report checkout, browser side
//!
//! Hooks the upload form on the landing page and sends the user to Stripe's
//! hosted checkout once the backend has created a session. Built with
//! `wasm-pack build --target web --out-dir ../checkout-dev-server/static/pkg`.

mod dom;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    let Some(window) = web_sys::window() else {
        log::warn!("no window, checkout trigger not installed");
        return;
    };

    let ready = dom::when_ready(window, |window| match dom::install(&window) {
        Ok(true) => {}
        Ok(false) => log::debug!("no upload form on this page"),
        Err(e) => log::error!("checkout trigger not installed: {e}"),
    });
    if let Err(e) = ready {
        log::error!("checkout trigger not installed: {e}");
    }
}
