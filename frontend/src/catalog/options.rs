//! Configuration and labels for the DearFlip catalogue viewer.

use serde::Serialize;

/// Options object passed to `$(el).dearflip(..)`. Callbacks are attached
/// separately since they are JS closures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipbookOptions {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub auto_sound: bool,
    pub enable_sound: bool,
    pub duration: u32,
    pub enable_download: bool,
    pub height: &'static str,
    pub width: &'static str,
    pub is_responsive: bool,
    pub background_color: &'static str,
    pub show_print_control: bool,
}

impl FlipbookOptions {
    pub fn new(source: impl Into<String>, duration: u32) -> Self {
        Self {
            source: source.into(),
            kind: "flipbook",
            auto_sound: false,
            enable_sound: false,
            duration,
            // The page has its own download button.
            enable_download: false,
            height: "100%",
            width: "100%",
            is_responsive: true,
            background_color: "transparent",
            show_print_control: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Loading,
    MissingJquery,
    LoadFailed,
    InitFailed,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::Loading => "Cargando catálogo…",
            Status::MissingJquery => "Falta jQuery para el catálogo (DearFlip lo necesita).",
            Status::LoadFailed => "No se pudo cargar el PDF. Verifica el nombre/ruta.",
            Status::InitFailed => "Error inicializando el visor. Revisa librerías (DearFlip).",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTurn {
    Prev,
    Next,
}

impl PageTurn {
    pub fn as_str(self) -> &'static str {
        match self {
            PageTurn::Prev => "prev",
            PageTurn::Next => "next",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(PageTurn::Prev),
            "ArrowRight" => Some(PageTurn::Next),
            _ => None,
        }
    }
}

/// Page count as reported by the plugin; zero, negative or NaN mean unknown.
pub fn page_count(raw: Option<f64>) -> Option<u32> {
    raw.filter(|n| n.is_finite() && *n >= 1.0).map(|n| n as u32)
}

/// Zero-based page index from the plugin, shown one-based.
pub fn current_page(raw: Option<f64>) -> u32 {
    raw.filter(|n| n.is_finite() && *n >= 0.0)
        .map_or(0, |n| n as u32)
        .saturating_add(1)
}

pub fn page_label(current: u32, total: Option<u32>) -> String {
    match total {
        Some(total) => format!("{} / {}", current, total),
        None => "—".to_string(),
    }
}
