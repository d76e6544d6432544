use crate::config::SiteConfig;
use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::{describe_js, SiteError};
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys::Reflect;
use web_sys::{Document, Element};

pub const BUTTON_ID: &str = "emailBtn";
pub const LABEL_SELECTOR: &str = ".contacto-proink__label";
pub const COPIED_CLASS: &str = "is-copied";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    /// Write rejected (permissions, focus); the next click tries again.
    Deferred,
    Unsupported,
}

pub fn copied_label(email: &str) -> String {
    format!("¡Correo copiado! {}", email)
}

pub async fn write_text(text: &str) -> CopyOutcome {
    let Some(window) = web_sys::window() else {
        return CopyOutcome::Unsupported;
    };
    let navigator = window.navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false) {
        return CopyOutcome::Unsupported;
    }
    match JsFuture::from(navigator.clipboard().write_text(text)).await {
        Ok(_) => CopyOutcome::Copied,
        Err(e) => {
            log::error!("Error al copiar el correo: {}", describe_js(&e));
            CopyOutcome::Deferred
        }
    }
}

/// Copy feedback on the button. A new copy restarts the timer instead of
/// stacking restores, and the label always reverts to its original text.
struct Feedback {
    button: Element,
    original: RefCell<Option<String>>,
    pending: RefCell<Option<Timeout>>,
}

impl Feedback {
    fn show(self: &Rc<Self>, text: &str, duration_ms: u32) {
        dom::set_class(&self.button, COPIED_CLASS, true);
        if let Some(label) = dom::query_within(&self.button, LABEL_SELECTOR) {
            let mut original = self.original.borrow_mut();
            if original.is_none() {
                *original = Some(label.text_content().unwrap_or_default());
            }
            label.set_text_content(Some(text));
        }
        let this = Rc::clone(self);
        let timeout = Timeout::new(duration_ms, move || this.restore());
        // Replacing drops, and so cancels, the previous restore.
        *self.pending.borrow_mut() = Some(timeout);
    }

    fn restore(&self) {
        dom::set_class(&self.button, COPIED_CLASS, false);
        if let (Some(label), Some(text)) = (
            dom::query_within(&self.button, LABEL_SELECTOR),
            self.original.borrow().as_deref(),
        ) {
            label.set_text_content(Some(text));
        }
    }
}

pub fn install(doc: &Document, config: &SiteConfig) -> Result<(), SiteError> {
    let Some(button) = doc.get_element_by_id(BUTTON_ID) else {
        return Ok(());
    };
    let feedback = Rc::new(Feedback {
        button: button.clone(),
        original: RefCell::new(None),
        pending: RefCell::new(None),
    });
    let email = config.contact_email.clone();
    let duration = config.copy_feedback_ms;
    dom::listen(&button, "click", ListenOptions::default(), move |_| {
        let feedback = Rc::clone(&feedback);
        let email = email.clone();
        spawn_local(async move {
            match write_text(&email).await {
                CopyOutcome::Copied => feedback.show(&copied_label(&email), duration),
                CopyOutcome::Deferred => {}
                CopyOutcome::Unsupported => log::debug!("async clipboard unavailable"),
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_mentions_the_address() {
        assert_eq!(
            copied_label("proinkqro@gmail.com"),
            "¡Correo copiado! proinkqro@gmail.com"
        );
    }
}
