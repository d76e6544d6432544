use wasm_bindgen::prelude::*;

pub mod config;
pub mod utils {
    pub mod dom;
    pub mod error;
}
pub mod nav {
    pub mod controller;
    pub mod dispatch;
    pub mod dom;
    pub mod state;
}
pub mod effects {
    pub mod autoplay;
    pub mod bounce;
    pub mod chrome;
    pub mod clipboard;
    pub mod reveal;
    pub mod transition;
}
pub mod catalog {
    pub mod options;
    pub mod viewer;
}

use config::SiteConfig;
use utils::error::SiteError;

fn report(effect: &str, result: Result<(), SiteError>) {
    if let Err(e) = result {
        log::warn!("{} disabled: {}", effect, e);
    }
}

/// Every effect checks for its own markup, so the same bundle runs on
/// every page of the site.
fn boot() {
    let config = SiteConfig::load();
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(doc) = window.document() else {
        return;
    };

    report("page chrome", effects::chrome::install(&window, &doc, &config));
    report("mobile navigation", nav::dom::install(&doc));
    report("reveal", effects::reveal::install(&window, &doc, &config));
    report("video autoplay", effects::autoplay::install(&window, &doc));
    report("page transitions", effects::transition::install(&doc, &config));
    report("bounce", effects::bounce::install(&doc));
    report("email copy", effects::clipboard::install(&doc, &config));
    report("catalogue", catalog::viewer::install(&config));
}

#[wasm_bindgen(start)]
pub fn start() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    if let Err(e) = utils::dom::on_dom_ready(boot) {
        log::warn!("site scripts not started: {}", e);
    }
}
