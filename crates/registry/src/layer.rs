use std::collections::BTreeMap;

use foundation::bounds::Aabb2;

use crate::feature::Feature;
use crate::style::Style;

/// A named, independently toggleable collection of features sharing one
/// default style.
///
/// Ordering contract:
/// - `features()` yields source document order, stable across calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: String,
    pub name: String,
    pub default_style: Style,
    /// Whether the layer participates in rendering. A pure flag: toggling
    /// it never touches feature styles.
    pub visible: bool,
    /// Attribute the UI offers for single-layer search on this layer,
    /// as declared in configuration.
    pub search_attribute: Option<String>,
    loaded: Option<LoadedFeatures>,
}

#[derive(Debug, Clone, PartialEq)]
struct LoadedFeatures {
    features: Vec<Feature>,
    by_id: BTreeMap<String, usize>,
    bounds: Option<Aabb2>,
}

impl Layer {
    pub(crate) fn new(id: String, name: String, default_style: Style, visible: bool) -> Self {
        Self {
            id,
            name,
            default_style,
            visible,
            search_attribute: None,
            loaded: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Box enclosing every loaded feature, for initial view framing.
    pub fn bounds(&self) -> Option<Aabb2> {
        self.loaded.as_ref().and_then(|l| l.bounds)
    }

    pub fn feature_count(&self) -> usize {
        self.loaded.as_ref().map_or(0, |l| l.features.len())
    }

    /// Features in document order; empty when the layer is not loaded.
    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.loaded.iter().flat_map(|l| l.features.iter())
    }

    pub fn features_mut(&mut self) -> impl Iterator<Item = &mut Feature> {
        self.loaded.iter_mut().flat_map(|l| l.features.iter_mut())
    }

    pub fn feature(&self, feature_id: &str) -> Option<&Feature> {
        let loaded = self.loaded.as_ref()?;
        let idx = *loaded.by_id.get(feature_id)?;
        loaded.features.get(idx)
    }

    pub fn feature_mut(&mut self, feature_id: &str) -> Option<&mut Feature> {
        let loaded = self.loaded.as_mut()?;
        let idx = *loaded.by_id.get(feature_id)?;
        loaded.features.get_mut(idx)
    }

    /// Replaces any previously loaded features (last writer wins).
    pub(crate) fn attach(&mut self, features: Vec<Feature>, bounds: Option<Aabb2>) {
        let mut by_id = BTreeMap::new();
        for (idx, feature) in features.iter().enumerate() {
            by_id.insert(feature.id.clone(), idx);
        }
        self.loaded = Some(LoadedFeatures {
            features,
            by_id,
            bounds,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::Layer;
    use crate::feature::Feature;
    use crate::style::Style;
    use formats::{Geometry, Position};
    use serde_json::Map;

    fn point_feature(id: &str) -> Feature {
        let geometry = Geometry::Point(Position::new(1.0, 2.0));
        Feature {
            id: id.to_string(),
            bounds: geometry.bounds(),
            geometry,
            properties: Map::new(),
            current_style: Style::default(),
        }
    }

    #[test]
    fn unloaded_layer_is_empty() {
        let layer = Layer::new(
            "lots".to_string(),
            "Lots".to_string(),
            Style::default(),
            true,
        );
        assert!(!layer.is_loaded());
        assert_eq!(layer.features().count(), 0);
        assert!(layer.feature("0").is_none());
        assert!(layer.bounds().is_none());
    }

    #[test]
    fn lookup_by_id_and_document_order() {
        let mut layer = Layer::new(
            "lots".to_string(),
            "Lots".to_string(),
            Style::default(),
            true,
        );
        layer.attach(
            vec![point_feature("b"), point_feature("a")],
            None,
        );

        // Iteration keeps document order even though the index is sorted.
        let ids: Vec<&str> = layer.features().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(layer.feature("a").map(|f| f.id.as_str()), Some("a"));

        // Re-attach replaces the previous load.
        layer.attach(vec![point_feature("c")], None);
        assert_eq!(layer.feature_count(), 1);
        assert!(layer.feature("b").is_none());
    }
}
