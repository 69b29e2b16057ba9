use serde::{Deserialize, Serialize};

/// Stroke + fill presentation state for one feature, in the form the map
/// collaborator consumes (CSS colors, Leaflet-style weights and opacities).
///
/// Styles appear in two roles: as a layer's `default_style` declared in
/// configuration, and as each feature's mutable `current_style` driven by
/// the query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub color: String,
    pub weight: f64,
    #[serde(default = "full_opacity")]
    pub opacity: f64,
    pub fill_color: String,
    pub fill_opacity: f64,
}

fn full_opacity() -> f64 {
    1.0
}

impl Style {
    pub fn new(
        color: impl Into<String>,
        weight: f64,
        fill_color: impl Into<String>,
        fill_opacity: f64,
    ) -> Self {
        Self {
            color: color.into(),
            weight,
            opacity: 1.0,
            fill_color: fill_color.into(),
            fill_opacity,
        }
    }

    /// Filter match: the layer's own colors at full strength.
    pub fn emphasized(default: &Style) -> Self {
        Self {
            opacity: 1.0,
            fill_opacity: 0.3,
            ..default.clone()
        }
    }

    /// Filter miss: faded almost out, still hit-testable on the map.
    pub fn de_emphasized(default: &Style) -> Self {
        Self {
            opacity: 0.1,
            fill_opacity: 0.05,
            ..default.clone()
        }
    }

    /// Search result override; deliberately layer-independent so a hit reads
    /// the same on every layer.
    pub fn highlight() -> Self {
        Self {
            color: "#FF0000".to_string(),
            weight: 4.0,
            opacity: 1.0,
            fill_color: "#FF0000".to_string(),
            fill_opacity: 0.7,
        }
    }

    /// Pointer-over feedback on top of the layer's own colors.
    pub fn hover(default: &Style) -> Self {
        Self {
            weight: 4.0,
            fill_opacity: 0.7,
            ..default.clone()
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: "#3388ff".to_string(),
            weight: 2.0,
            opacity: 1.0,
            fill_color: "#3388ff".to_string(),
            fill_opacity: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Style;
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_styles_keep_layer_colors() {
        let base = Style::new("#00ff00", 3.0, "#00ff00", 0.1);

        let emphasized = Style::emphasized(&base);
        assert_eq!(emphasized.color, "#00ff00");
        assert_eq!(emphasized.opacity, 1.0);
        assert_eq!(emphasized.fill_opacity, 0.3);

        let faded = Style::de_emphasized(&base);
        assert_eq!(faded.opacity, 0.1);
        assert_eq!(faded.fill_opacity, 0.05);

        let hover = Style::hover(&base);
        assert_eq!(hover.weight, 4.0);
        assert_eq!(hover.color, "#00ff00");
    }

    #[test]
    fn highlight_is_layer_independent() {
        assert_eq!(Style::highlight(), Style::highlight());
        assert_eq!(Style::highlight().color, "#FF0000");
    }

    #[test]
    fn deserializes_config_form_with_default_opacity() {
        let style: Style = serde_json::from_str(
            r##"{"color": "#ff7800", "weight": 2, "fillOpacity": 0.2, "fillColor": "#ff7800"}"##,
        )
        .expect("parse style");
        assert_eq!(style.opacity, 1.0);
        assert_eq!(style.fill_color, "#ff7800");
    }
}
