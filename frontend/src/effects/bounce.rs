//! Jelly bounce on the floating WhatsApp button.

use crate::utils::dom::{self, ListenOptions};
use crate::utils::error::SiteError;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{Document, Element};

pub const BOUNCE_SELECTOR: &str = ".whatsapp-float";

const FRAMES: [&str; 7] = [
    "scale(1)",
    "scale(1.35, 0.80)",
    "scale(0.75, 1.1)",
    "scale(1.25, 0.85)",
    "scale(0.9, 1.4)",
    "scale(1.08)",
    "scale(1)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Hover,
    Tap,
}

#[derive(Debug, Serialize)]
pub struct Keyframe {
    pub transform: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Timing {
    pub duration: u32,
    pub easing: &'static str,
    pub fill: &'static str,
}

pub fn keyframes() -> Vec<Keyframe> {
    FRAMES.iter().map(|&transform| Keyframe { transform }).collect()
}

pub fn timing(gesture: Gesture) -> Timing {
    Timing {
        duration: match gesture {
            Gesture::Hover => 750,
            Gesture::Tap => 1000,
        },
        easing: "cubic-bezier(.25,1.7,.45,1)",
        fill: "both",
    }
}

fn play(el: &Element, gesture: Gesture) -> Result<(), SiteError> {
    let animate = Reflect::get(el, &JsValue::from_str("animate"))?;
    let Some(animate) = animate.dyn_ref::<Function>() else {
        log::debug!("Web Animations API unavailable, skipping bounce");
        return Ok(());
    };
    let frames = serde_wasm_bindgen::to_value(&keyframes())?;
    let options = serde_wasm_bindgen::to_value(&timing(gesture))?;
    animate.call2(el, &frames, &options)?;
    Ok(())
}

pub fn install(doc: &Document) -> Result<(), SiteError> {
    let Some(button) = dom::query(doc, BOUNCE_SELECTOR) else {
        return Ok(());
    };
    for (event, gesture) in [("mouseenter", Gesture::Hover), ("click", Gesture::Tap)] {
        let el = button.clone();
        dom::listen(&button, event, ListenOptions::default(), move |_| {
            if let Err(e) = play(&el, gesture) {
                log::debug!("bounce failed: {}", e);
            }
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tap_bounces_longer_than_hover() {
        assert_eq!(timing(Gesture::Hover).duration, 750);
        assert_eq!(timing(Gesture::Tap).duration, 1000);
        assert_eq!(timing(Gesture::Tap).fill, "both");
    }

    #[test]
    fn animation_starts_and_ends_at_rest() {
        let frames = keyframes();
        assert_eq!(frames.len(), 7);
        assert_eq!(frames.first().map(|f| f.transform), Some("scale(1)"));
        assert_eq!(frames.last().map(|f| f.transform), Some("scale(1)"));
        let json = serde_json::to_value(&frames[1]).unwrap();
        assert_eq!(json, serde_json::json!({ "transform": "scale(1.35, 0.80)" }));
    }
}
