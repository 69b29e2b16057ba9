use registry::{HighlightRef, Registry, Style};

use crate::matching::{loose_eq, value_text};
use crate::view::ViewSink;

/// Attribute the cross-layer search and autocomplete run against; the
/// cadastral datasets carry the parcel number under this key on every
/// searchable layer.
pub const LOT_NUMBER_ATTRIBUTE: &str = "NUM_LOTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    EmptyQuery,
    NotFound(String),
    UnknownLayer(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::EmptyQuery => write!(f, "enter a value to search for"),
            QueryError::NotFound(term) => write!(f, "no matching feature for: {term}"),
            QueryError::UnknownLayer(id) => write!(f, "unknown layer: {id}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// The feature a successful search focused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub layer_id: String,
    pub feature_id: String,
}

/// Partition one layer's features into emphasized/de-emphasized by
/// attribute value.
///
/// An empty `filter_value` emphasizes everything (equivalent to a reset of
/// this layer). Unknown or unloaded layers are a silent no-op: the filter
/// UI fires while layers are still loading, and those calls must not
/// surface as errors. This is the one deliberate exception to the
/// registry's error policy.
///
/// Idempotent: re-applying the same call yields the same styles.
pub fn filter(registry: &mut Registry, layer_id: &str, attribute: &str, filter_value: &str) {
    let Some(layer) = registry.layer_mut(layer_id) else {
        return;
    };
    let default = layer.default_style.clone();

    for feature in layer.features_mut() {
        let matched = filter_value.is_empty()
            || feature
                .property(attribute)
                .is_some_and(|value| loose_eq(value, filter_value));
        feature.current_style = if matched {
            Style::emphasized(&default)
        } else {
            Style::de_emphasized(&default)
        };
    }
}

/// Every feature of every layer back to its layer default; clears the
/// active highlight. Total, unconditional, idempotent.
pub fn reset_all_styles(registry: &mut Registry) {
    for layer in registry.layers_mut() {
        let default = layer.default_style.clone();
        for feature in layer.features_mut() {
            feature.current_style = default.clone();
        }
    }
    registry.set_active_highlight(None);
}

/// Cross-layer search by the designated lot-number attribute.
pub fn search_lot_number(
    registry: &mut Registry,
    term: &str,
    sink: &mut dyn ViewSink,
) -> Result<SearchHit, QueryError> {
    search_all(registry, LOT_NUMBER_ATTRIBUTE, term, sink)
}

/// Cross-layer first-match search.
///
/// All styles are reset before scanning, unconditionally, even when the
/// search goes on to find nothing. Layers are scanned in registration
/// order, features in document order; the scan stops at the first feature
/// whose trimmed attribute text equals or contains the trimmed term.
/// Stopping is contractual: scanning on would re-style a second feature and
/// leave the focused one ambiguous. Partial-match ties are resolved by scan
/// order and nothing else.
pub fn search_all(
    registry: &mut Registry,
    attribute: &str,
    term: &str,
    sink: &mut dyn ViewSink,
) -> Result<SearchHit, QueryError> {
    let term = term.trim();
    if term.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    reset_all_styles(registry);

    let layer_ids: Vec<String> = registry.layers().map(|l| l.id().to_string()).collect();
    for layer_id in layer_ids {
        let Some(layer) = registry.layer_mut(&layer_id) else {
            continue;
        };

        let mut hit = None;
        for feature in layer.features_mut() {
            let Some(value) = feature.property(attribute) else {
                continue;
            };
            let Some(text) = value_text(value) else {
                continue;
            };
            let text = text.trim();
            if text == term || text.contains(term) {
                feature.current_style = Style::highlight();
                hit = Some(feature.id.clone());
                break;
            }
        }

        if let Some(feature_id) = hit {
            registry.set_active_highlight(Some(HighlightRef {
                layer_id: layer_id.clone(),
                feature_id: feature_id.clone(),
            }));
            if let Some(feature) = registry.layer(&layer_id).and_then(|l| l.feature(&feature_id)) {
                if let Some(bounds) = feature.bounds {
                    sink.frame_to(bounds);
                }
                sink.open_info_panel(&layer_id, feature);
            }
            return Ok(SearchHit {
                layer_id,
                feature_id,
            });
        }
    }

    Err(QueryError::NotFound(term.to_string()))
}

/// Single-layer search over an arbitrary attribute.
///
/// Case-insensitive substring match against the attribute's text (missing
/// attributes read as the empty string). Unlike the cross-layer search this
/// visits every feature: matches get the highlight style, non-matches are
/// reset to the layer default, and the first match in document order is the
/// one focused and framed. A previous highlight elsewhere is restored
/// before styling.
pub fn search_feature(
    registry: &mut Registry,
    layer_id: &str,
    attribute: &str,
    term: &str,
    sink: &mut dyn ViewSink,
) -> Result<SearchHit, QueryError> {
    restore_active_highlight(registry);

    let Some(layer) = registry.layer_mut(layer_id) else {
        return Err(QueryError::UnknownLayer(layer_id.to_string()));
    };
    let default = layer.default_style.clone();
    let term_lower = term.to_lowercase();

    let mut first = None;
    for feature in layer.features_mut() {
        let text = feature
            .property(attribute)
            .and_then(value_text)
            .unwrap_or_default();
        if text.to_lowercase().contains(&term_lower) {
            feature.current_style = Style::highlight();
            if first.is_none() {
                first = Some(feature.id.clone());
            }
        } else {
            feature.current_style = default.clone();
        }
    }

    let Some(feature_id) = first else {
        return Err(QueryError::NotFound(term.to_string()));
    };

    registry.set_active_highlight(Some(HighlightRef {
        layer_id: layer_id.to_string(),
        feature_id: feature_id.clone(),
    }));
    if let Some(feature) = registry.layer(layer_id).and_then(|l| l.feature(&feature_id)) {
        if let Some(bounds) = feature.bounds {
            sink.frame_to(bounds);
        }
        sink.open_info_panel(layer_id, feature);
    }
    Ok(SearchHit {
        layer_id: layer_id.to_string(),
        feature_id,
    })
}

/// Lot-number values for autocomplete: every value across all layers that
/// contains `term` (case-sensitive), in scan order, duplicates kept. Pure
/// query, no style effects.
pub fn suggest(registry: &Registry, term: &str) -> Vec<String> {
    let mut out = Vec::new();
    for layer in registry.layers() {
        for feature in layer.features() {
            let Some(value) = feature.property(LOT_NUMBER_ATTRIBUTE) else {
                continue;
            };
            let Some(text) = value_text(value) else {
                continue;
            };
            let text = text.trim();
            if text.contains(term) {
                out.push(text.to_string());
            }
        }
    }
    out
}

fn restore_active_highlight(registry: &mut Registry) {
    let Some(highlight) = registry.active_highlight().cloned() else {
        return;
    };
    if let Some(layer) = registry.layer_mut(&highlight.layer_id) {
        let default = layer.default_style.clone();
        if let Some(feature) = layer.feature_mut(&highlight.feature_id) {
            feature.current_style = default;
        }
    }
    registry.set_active_highlight(None);
}
