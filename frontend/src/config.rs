use crate::utils::dom;
use crate::utils::error::SiteError;
use serde::Deserialize;

/// Id of the optional inline JSON block that overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Tunables for the page effects. Any field missing from the inline config
/// keeps its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub contact_email: String,
    pub copy_feedback_ms: u32,
    pub transition_delay_ms: u32,
    pub header_scroll_threshold: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub catalog_source: String,
    pub flip_duration_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            contact_email: "proinkqro@gmail.com".to_string(),
            copy_feedback_ms: 1600,
            transition_delay_ms: 280,
            header_scroll_threshold: 60.0,
            reveal_threshold: 0.12,
            reveal_root_margin: "0px 0px -20% 0px".to_string(),
            catalog_source: "ejemplorevista.pdf".to_string(),
            flip_duration_ms: 700,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads `<script type="application/json" id="site-config">` if the page
    /// has one. A malformed block is reported and ignored.
    pub fn load() -> Self {
        let raw = dom::document()
            .and_then(|doc| doc.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring site config: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_gives_defaults() {
        assert_eq!(SiteConfig::from_json("  \n").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_block_keeps_other_defaults() {
        let config =
            SiteConfig::from_json(r#"{"catalogSource": "catalogo-2025.pdf", "transitionDelayMs": 0}"#)
                .unwrap();
        assert_eq!(config.catalog_source, "catalogo-2025.pdf");
        assert_eq!(config.transition_delay_ms, 0);
        assert_eq!(config.contact_email, "proinkqro@gmail.com");
        assert_eq!(config.copy_feedback_ms, 1600);
    }

    #[test]
    fn malformed_block_is_an_error() {
        assert!(matches!(
            SiteConfig::from_json("{catalogSource:"),
            Err(SiteError::Config(_))
        ));
    }
}
