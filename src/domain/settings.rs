//! Remote site settings used for theming.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_BUTTON_COLOR: &str = "#FC5D43";
pub const DEFAULT_PRIMARY_COLOR: &str = "#FFFFFF";

/// Site settings document. Only the theme colours are interpreted; every
/// other key is kept as-is for templates.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SiteSettings {
    #[serde(default)]
    pub button_color: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SiteSettings {
    /// Reads a settings response, unwrapping a `{"results": [..]}` envelope.
    ///
    /// A `button_color` on the envelope wins over the one inside the first
    /// result.
    pub fn from_response(value: Value) -> Result<Self, serde_json::Error> {
        let envelope_button = value
            .get("button_color")
            .and_then(Value::as_str)
            .map(str::to_string);

        let inner = match value.get("results").and_then(Value::as_array) {
            Some(results) => results
                .first()
                .cloned()
                .unwrap_or(Value::Object(Map::new())),
            None => value,
        };

        let mut settings: SiteSettings = serde_json::from_value(inner)?;
        if envelope_button.is_some() {
            settings.button_color = envelope_button;
        }
        Ok(settings)
    }

    pub fn theme(&self) -> Theme {
        Theme {
            button_color: non_blank(self.button_color.as_deref())
                .unwrap_or(DEFAULT_BUTTON_COLOR)
                .to_string(),
            primary_color: non_blank(self.primary_color.as_deref())
                .unwrap_or(DEFAULT_PRIMARY_COLOR)
                .to_string(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Colours applied to the rendered pages.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Theme {
    pub button_color: String,
    pub primary_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        SiteSettings::default().theme()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwraps_results_envelope() {
        let settings = SiteSettings::from_response(json!({
            "results": [{"primary_color": "#123456", "site_name": "Shikkha"}],
            "button_color": "#000000"
        }))
        .unwrap();

        assert_eq!(settings.primary_color.as_deref(), Some("#123456"));
        assert_eq!(settings.button_color.as_deref(), Some("#000000"));
        assert_eq!(settings.extra["site_name"], json!("Shikkha"));
    }

    #[test]
    fn blank_colours_fall_back_to_defaults() {
        let settings = SiteSettings::from_response(json!({"button_color": " "})).unwrap();

        assert_eq!(settings.theme(), Theme::default());
        assert_eq!(Theme::default().button_color, DEFAULT_BUTTON_COLOR);
    }
}
