use std::collections::BTreeMap;

use foundation::bounds::Aabb2;

use crate::feature::Feature;
use crate::layer::Layer;
use crate::style::Style;

/// Points at the single feature currently carrying the highlight style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRef {
    pub layer_id: String,
    pub feature_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateLayer(String),
    UnknownLayer(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateLayer(id) => write!(f, "layer already registered: {id}"),
            RegistryError::UnknownLayer(id) => write!(f, "unknown layer: {id}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Single source of truth for which layers exist and what they hold.
///
/// An explicit value owned by the application root, with lifecycle
/// create → register → attach → query/export → discard. Queries mutate it
/// through the `query` crate; the map collaborator only ever reads.
///
/// Ordering contract:
/// - `layers()` yields registration order; multi-layer operations scan in
///   exactly that order.
#[derive(Debug, Default)]
pub struct Registry {
    layers: Vec<Layer>,
    by_id: BTreeMap<String, usize>,
    active_highlight: Option<HighlightRef>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_layer(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        default_style: Style,
        visible: bool,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateLayer(id));
        }
        self.by_id.insert(id.clone(), self.layers.len());
        self.layers
            .push(Layer::new(id, name.into(), default_style, visible));
        Ok(())
    }

    /// Attach decoded features to a registered layer.
    ///
    /// Replaces any earlier load for the same id (last writer wins). A
    /// highlight pointing into the replaced features would dangle, so it is
    /// dropped here.
    pub fn attach_features(
        &mut self,
        id: &str,
        features: Vec<Feature>,
        bounds: Option<Aabb2>,
    ) -> Result<(), RegistryError> {
        let Some(&idx) = self.by_id.get(id) else {
            return Err(RegistryError::UnknownLayer(id.to_string()));
        };
        if self
            .active_highlight
            .as_ref()
            .is_some_and(|h| h.layer_id == id)
        {
            self.active_highlight = None;
        }
        self.layers[idx].attach(features, bounds);
        Ok(())
    }

    /// Pure visibility flag; feature styles are untouched.
    pub fn set_visibility(&mut self, id: &str, visible: bool) -> Result<(), RegistryError> {
        let Some(layer) = self.layer_mut(id) else {
            return Err(RegistryError::UnknownLayer(id.to_string()));
        };
        layer.visible = visible;
        Ok(())
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.by_id.get(id).map(|&idx| &self.layers[idx])
    }

    pub fn layer_mut(&mut self, id: &str) -> Option<&mut Layer> {
        let idx = *self.by_id.get(id)?;
        self.layers.get_mut(idx)
    }

    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn layers_mut(&mut self) -> impl Iterator<Item = &mut Layer> {
        self.layers.iter_mut()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn loaded_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.is_loaded()).count()
    }

    /// The one feature currently highlighted by a search, if any.
    pub fn active_highlight(&self) -> Option<&HighlightRef> {
        self.active_highlight.as_ref()
    }

    pub fn set_active_highlight(&mut self, highlight: Option<HighlightRef>) {
        self.active_highlight = highlight;
    }
}
