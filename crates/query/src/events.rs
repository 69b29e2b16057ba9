use registry::{Registry, Style};

use crate::view::ViewSink;

/// Pointer interactions forwarded by the map collaborator.
///
/// Events carry ids, not references: they may arrive after the layer they
/// point at has been reloaded, in which case they are dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    HoverEnter { layer_id: String, feature_id: String },
    HoverExit { layer_id: String, feature_id: String },
    Click { layer_id: String, feature_id: String },
}

pub fn dispatch(registry: &mut Registry, event: &MapEvent, sink: &mut dyn ViewSink) {
    match event {
        MapEvent::HoverEnter {
            layer_id,
            feature_id,
        } => {
            let Some(layer) = registry.layer_mut(layer_id) else {
                return;
            };
            let default = layer.default_style.clone();
            if let Some(feature) = layer.feature_mut(feature_id) {
                feature.current_style = Style::hover(&default);
            }
        }
        MapEvent::HoverExit {
            layer_id,
            feature_id,
        } => {
            // Exit restores the layer default, even mid-filter.
            let Some(layer) = registry.layer_mut(layer_id) else {
                return;
            };
            let default = layer.default_style.clone();
            if let Some(feature) = layer.feature_mut(feature_id) {
                feature.current_style = default;
            }
        }
        MapEvent::Click {
            layer_id,
            feature_id,
        } => {
            let Some(feature) = registry.layer(layer_id).and_then(|l| l.feature(feature_id))
            else {
                return;
            };
            if let Some(bounds) = feature.bounds {
                sink.frame_to(bounds);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MapEvent, dispatch};
    use crate::view::{NullSink, ViewSink};
    use foundation::bounds::Aabb2;
    use registry::{Feature, Registry, Style, decode_document};

    const LOTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"NUM_LOTS": "100"},
                "geometry": {"type": "Point", "coordinates": [-4.01, 5.35]}
            }
        ]
    }"#;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_layer("lots", "Lots", Style::default(), true)
            .expect("register");
        let decoded = decode_document(LOTS, &Style::default()).expect("decode");
        registry
            .attach_features("lots", decoded.features, decoded.bounds)
            .expect("attach");
        registry
    }

    fn style_of(registry: &Registry, feature_id: &str) -> Style {
        registry
            .layer("lots")
            .and_then(|l| l.feature(feature_id))
            .expect("feature")
            .current_style
            .clone()
    }

    #[test]
    fn hover_cycle_restores_the_default() {
        let mut registry = sample_registry();

        let enter = MapEvent::HoverEnter {
            layer_id: "lots".to_string(),
            feature_id: "0".to_string(),
        };
        dispatch(&mut registry, &enter, &mut NullSink);
        assert_eq!(style_of(&registry, "0"), Style::hover(&Style::default()));

        let exit = MapEvent::HoverExit {
            layer_id: "lots".to_string(),
            feature_id: "0".to_string(),
        };
        dispatch(&mut registry, &exit, &mut NullSink);
        assert_eq!(style_of(&registry, "0"), Style::default());
    }

    #[test]
    fn click_frames_the_feature() {
        struct Framing(Vec<Aabb2>);
        impl ViewSink for Framing {
            fn frame_to(&mut self, bounds: Aabb2) {
                self.0.push(bounds);
            }
            fn open_info_panel(&mut self, _layer_id: &str, _feature: &Feature) {}
        }

        let mut registry = sample_registry();
        let mut sink = Framing(Vec::new());
        let click = MapEvent::Click {
            layer_id: "lots".to_string(),
            feature_id: "0".to_string(),
        };
        dispatch(&mut registry, &click, &mut sink);
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].min, [-4.01, 5.35]);
    }

    #[test]
    fn stale_events_are_dropped() {
        let mut registry = sample_registry();
        dispatch(
            &mut registry,
            &MapEvent::HoverEnter {
                layer_id: "ghost".to_string(),
                feature_id: "0".to_string(),
            },
            &mut NullSink,
        );
        dispatch(
            &mut registry,
            &MapEvent::Click {
                layer_id: "lots".to_string(),
                feature_id: "missing".to_string(),
            },
            &mut NullSink,
        );
        // Still at defaults; nothing panicked, nothing framed.
        let style = registry
            .layer("lots")
            .and_then(|l| l.feature("0"))
            .expect("feature")
            .current_style
            .clone();
        assert_eq!(style, Style::default());
    }
}
