use registry::{Registry, RegistryError, Style};
use serde::{Deserialize, Serialize};

/// Startup configuration for the viewer: map parameters plus the ordered
/// layer declarations. Read once at startup and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerConfig {
    pub map: MapConfig,
    pub layers: Vec<LayerConfig>,
    /// Append a timestamp query parameter to layer URLs to defeat stale
    /// HTTP caches.
    #[serde(default)]
    pub cache_buster: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    /// `[lat, lon]`, as the map collaborator expects its center.
    pub center: [f64; 2],
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

/// One data layer declaration. Declaration order is registration order and
/// therefore the scan order of every multi-layer query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    pub id: String,
    pub name: String,
    pub url: String,
    pub style: Style,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub search_attribute: Option<String>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug)]
pub enum ConfigError {
    MalformedDocument(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MalformedDocument(reason) => {
                write!(f, "malformed viewer configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ViewerConfig {
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(payload).map_err(|e| ConfigError::MalformedDocument(e.to_string()))
    }
}

/// Register every declared layer, in declaration order.
///
/// Duplicate ids in the document surface as `RegistryError::DuplicateLayer`
/// rather than being silently collapsed.
pub fn build_registry(config: &ViewerConfig) -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    for layer in &config.layers {
        registry.register_layer(
            layer.id.clone(),
            layer.name.clone(),
            layer.style.clone(),
            layer.visible,
        )?;
        if let Some(registered) = registry.layer_mut(&layer.id) {
            registered.search_attribute = layer.search_attribute.clone();
        }
    }
    Ok(registry)
}
