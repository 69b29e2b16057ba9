use foundation::bounds::Aabb2;
use formats::Geometry;
use serde_json::{Map, Value};

use crate::style::Style;

/// One geographic record owned by a layer.
///
/// `current_style` is the only mutable presentation state in the system: it
/// starts as the owning layer's default and is rewritten exclusively by the
/// query engine. The map collaborator redraws from `(geometry,
/// current_style)` and never writes back.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Stable within the owning layer; source `id` when present, else the
    /// decode index.
    pub id: String,
    pub geometry: Geometry,
    pub properties: Map<String, Value>,
    /// `None` only for geometries with no positions (empty multi-parts).
    pub bounds: Option<Aabb2>,
    pub current_style: Style,
}

impl Feature {
    /// Attribute lookup. A JSON `null` is treated the same as an absent
    /// attribute: neither can match a search term or a non-empty filter.
    pub fn property(&self, name: &str) -> Option<&Value> {
        match self.properties.get(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Feature;
    use crate::style::Style;
    use formats::{Geometry, Position};
    use serde_json::{Map, Value, json};

    fn feature_with(properties: Map<String, Value>) -> Feature {
        let geometry = Geometry::Point(Position::new(0.0, 0.0));
        Feature {
            id: "0".to_string(),
            bounds: geometry.bounds(),
            geometry,
            properties,
            current_style: Style::default(),
        }
    }

    #[test]
    fn null_properties_read_as_absent() {
        let mut props = Map::new();
        props.insert("NUM_LOTS".to_string(), json!("12"));
        props.insert("OWNER".to_string(), Value::Null);
        let feature = feature_with(props);

        assert_eq!(feature.property("NUM_LOTS"), Some(&json!("12")));
        assert_eq!(feature.property("OWNER"), None);
        assert_eq!(feature.property("MISSING"), None);
    }
}
