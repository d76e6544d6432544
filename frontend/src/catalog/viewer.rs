//! Glue around the DearFlip jQuery plugin. The plugin is an opaque
//! collaborator: we hand it an options object, listen to three callbacks
//! and ask its instance handle to turn pages.

use crate::catalog::options::{current_page, page_count, page_label, FlipbookOptions, PageTurn, Status};
use crate::config::SiteConfig;
use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::{describe_js, SiteError};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{Element, HtmlElement, KeyboardEvent};

const BOOK_ID: &str = "book";
const LOADING_ID: &str = "loadingText";
const PREV_ID: &str = "prevPage";
const NEXT_ID: &str = "nextPage";
const PAGE_INFO_ID: &str = "pageInfo";
const APP_DATA_KEY: &str = "df-app";

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

/// Follows `path` through nested properties, stopping at the first
/// missing link.
fn number_at(root: &JsValue, path: &[&str]) -> Option<f64> {
    let mut value = root.clone();
    for key in path {
        if value.is_undefined() || value.is_null() {
            return None;
        }
        value = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
    }
    value.as_f64()
}

#[derive(Clone)]
struct CatalogUi {
    loading: Option<HtmlElement>,
    page_info: Option<Element>,
}

impl CatalogUi {
    fn set_status(&self, status: Status) {
        if let Some(el) = &self.loading {
            el.set_text_content(Some(status.message()));
            dom::set_style(el, "display", "block");
        }
    }

    fn hide_loading(&self) {
        if let Some(el) = &self.loading {
            dom::set_style(el, "display", "none");
        }
    }

    fn set_page(&self, current: u32, total: Option<u32>) {
        if let Some(el) = &self.page_info {
            el.set_text_content(Some(&page_label(current, total)));
        }
    }
}

/// `$(book)` wrapped fresh on every call; the plugin may swap its data.
#[derive(Clone)]
struct Book {
    jquery: Function,
    element: Element,
}

impl Book {
    fn wrapped(&self) -> Result<JsValue, JsValue> {
        self.jquery.call1(&JsValue::NULL, &self.element)
    }

    fn start(&self, options: &JsValue) -> Result<(), SiteError> {
        let wrapped = self.wrapped()?;
        let dearflip = method(&wrapped, "dearflip")
            .ok_or(SiteError::Plugin("dearflip is not registered on jQuery".to_string()))?;
        dearflip
            .call1(&wrapped, options)
            .map_err(|e| SiteError::Plugin(describe_js(&e)))?;
        Ok(())
    }

    /// Missing handle or method is not an error: the viewer may still be
    /// loading.
    fn turn(&self, turn: PageTurn) {
        let turned = (|| {
            let wrapped = self.wrapped().ok()?;
            let app = method(&wrapped, "data")?
                .call1(&wrapped, &JsValue::from_str(APP_DATA_KEY))
                .ok()?;
            method(&app, "openPage")?
                .call1(&app, &JsValue::from_str(turn.as_str()))
                .ok()
        })();
        if turned.is_none() {
            log::debug!("viewer not ready for {:?}", turn);
        }
    }
}

fn attach_callbacks(options: &JsValue, ui: &CatalogUi) -> Result<(), SiteError> {
    let on_ready = {
        let ui = ui.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |app: JsValue| {
            ui.hide_loading();
            let total = page_count(number_at(&app, &["book", "pageCount"]))
                .or_else(|| page_count(number_at(&app, &["options", "pageCount"])));
            ui.set_page(1, total);
        })
    };
    let on_page_changed = {
        let ui = ui.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |app: JsValue| {
            let current = current_page(number_at(&app, &["book", "currentPage"]));
            ui.set_page(current, page_count(number_at(&app, &["book", "pageCount"])));
        })
    };
    let on_error = {
        let ui = ui.clone();
        Closure::<dyn FnMut()>::new(move || {
            log::error!("catalogue PDF failed to load");
            ui.set_status(Status::LoadFailed);
        })
    };

    Reflect::set(options, &JsValue::from_str("onReady"), on_ready.as_ref())?;
    Reflect::set(options, &JsValue::from_str("onPageChanged"), on_page_changed.as_ref())?;
    Reflect::set(options, &JsValue::from_str("onError"), on_error.as_ref())?;
    on_ready.forget();
    on_page_changed.forget();
    on_error.forget();
    Ok(())
}

fn bind_controls(book: &Book) -> Result<(), SiteError> {
    let Some(doc) = dom::document() else {
        return Ok(());
    };
    for (id, turn) in [(PREV_ID, PageTurn::Prev), (NEXT_ID, PageTurn::Next)] {
        if let Some(button) = doc.get_element_by_id(id) {
            let book = book.clone();
            dom::listen(&button, "click", ListenOptions::default(), move |_| book.turn(turn))?;
        }
    }
    if let Some(window) = web_sys::window() {
        let book = book.clone();
        dom::listen(&window, "keydown", ListenOptions::default(), move |event| {
            let turn = event
                .dyn_ref::<KeyboardEvent>()
                .and_then(|e| PageTurn::from_key(&e.key()));
            if let Some(turn) = turn {
                book.turn(turn);
            }
        })?;
    }
    Ok(())
}

fn boot(source: &str, duration: u32) -> Result<(), SiteError> {
    let window = web_sys::window().ok_or(SiteError::MissingElement("window"))?;
    let doc = window.document().ok_or(SiteError::MissingElement("document"))?;
    let Some(element) = doc.get_element_by_id(BOOK_ID) else {
        return Ok(());
    };
    let ui = CatalogUi {
        loading: doc
            .get_element_by_id(LOADING_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        page_info: doc.get_element_by_id(PAGE_INFO_ID),
    };

    let Some(jquery) = method(&window, "jQuery") else {
        ui.set_status(Status::MissingJquery);
        return Err(SiteError::Plugin("jQuery is not loaded".to_string()));
    };

    ui.set_status(Status::Loading);
    element.set_inner_html("");

    let options = serde_wasm_bindgen::to_value(&FlipbookOptions::new(source, duration))?;
    attach_callbacks(&options, &ui)?;

    let book = Book { jquery, element };
    if let Err(e) = book.start(&options) {
        ui.set_status(Status::InitFailed);
        return Err(e);
    }
    bind_controls(&book)?;
    log::info!("catalogue viewer started for {}", source);
    Ok(())
}

/// Starts the viewer after `load`, when jQuery and DearFlip have run.
pub fn install(config: &SiteConfig) -> Result<(), SiteError> {
    let source = config.catalog_source.clone();
    let duration = config.flip_duration_ms;
    dom::on_window_load(move || {
        if let Err(e) = boot(&source, duration) {
            log::error!("Catalogue viewer: {}", e);
        }
    })
}
