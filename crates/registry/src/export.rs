use formats::{FeatureCollection, RawFeature};
use serde_json::Value;

use crate::registry::{Registry, RegistryError};

/// Export document flavors; only GeoJSON today, the parameter exists so
/// the download UI can grow formats without an API break.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportFormat {
    GeoJson,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::GeoJson => "geojson",
        }
    }
}

/// Snapshot a layer's currently loaded features as a FeatureCollection.
///
/// Geometry, properties and ids round-trip; `current_style` is presentation
/// state and never leaves the registry.
pub fn export_layer(registry: &Registry, layer_id: &str) -> Result<Value, RegistryError> {
    let Some(layer) = registry.layer(layer_id) else {
        return Err(RegistryError::UnknownLayer(layer_id.to_string()));
    };
    if !layer.is_loaded() {
        return Err(RegistryError::UnknownLayer(layer_id.to_string()));
    }

    let features = layer
        .features()
        .map(|f| RawFeature {
            id: Some(f.id.clone()),
            properties: f.properties.clone(),
            geometry: f.geometry.clone(),
        })
        .collect();
    Ok(FeatureCollection { features }.to_geojson_value())
}

/// Filename handed to the file-save collaborator alongside the document.
pub fn export_filename(layer_id: &str, format: ExportFormat) -> String {
    format!("{layer_id}_export.{}", format.extension())
}
