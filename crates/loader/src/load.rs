use std::time::{SystemTime, UNIX_EPOCH};

use config::{LayerConfig, ViewerConfig};
use formats::DecodeError;
use query::ViewSink;
use registry::{Registry, decode_document};
use tracing::{info, warn};

use crate::fetch::{FetchDocument, FetchError};

#[derive(Debug)]
pub enum LoadError {
    Fetch(FetchError),
    Decode(DecodeError),
    UnknownLayer(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Fetch(e) => write!(f, "layer fetch failed: {e}"),
            LoadError::Decode(e) => write!(f, "layer document invalid: {e}"),
            LoadError::UnknownLayer(id) => write!(f, "layer not registered: {id}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// URL actually requested for a layer: the configured one, plus a
/// timestamp parameter when cache-busting is on.
pub fn request_url(url: &str, cache_buster: bool) -> String {
    if !cache_buster {
        return url.to_string();
    }
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{url}?v={millis}")
}

/// Fetch, decode and attach one configured layer.
///
/// The attach is atomic: any fetch or decode failure returns before the
/// registry is touched, so a failed (re)load leaves the previous state
/// intact. When this attach is the registry's first loaded layer, the view
/// is framed to it.
pub async fn load_layer<F: FetchDocument>(
    registry: &mut Registry,
    fetcher: &F,
    layer: &LayerConfig,
    cache_buster: bool,
    sink: &mut dyn ViewSink,
) -> Result<(), LoadError> {
    let Some(registered) = registry.layer(&layer.id) else {
        return Err(LoadError::UnknownLayer(layer.id.clone()));
    };
    let default_style = registered.default_style.clone();

    let url = request_url(&layer.url, cache_buster);
    info!("loading layer {} from {url}", layer.id);

    let payload = fetcher.fetch(&url).await.map_err(LoadError::Fetch)?;
    let decoded = decode_document(&payload, &default_style).map_err(LoadError::Decode)?;

    let first_load = registry.loaded_layer_count() == 0;
    let bounds = decoded.bounds;
    let count = decoded.features.len();
    registry
        .attach_features(&layer.id, decoded.features, bounds)
        .map_err(|_| LoadError::UnknownLayer(layer.id.clone()))?;

    info!("layer {} loaded ({count} features)", layer.id);
    if first_load && let Some(b) = bounds {
        sink.frame_to(b);
    }
    Ok(())
}

/// Load every configured layer in declaration order.
///
/// Per-layer failures are logged and collected, not fatal: the remaining
/// layers still load, matching the viewer's per-layer error notification.
pub async fn load_all_layers<F: FetchDocument>(
    registry: &mut Registry,
    fetcher: &F,
    config: &ViewerConfig,
    sink: &mut dyn ViewSink,
) -> Vec<(String, LoadError)> {
    let mut failures = Vec::new();
    for layer in &config.layers {
        if let Err(err) = load_layer(registry, fetcher, layer, config.cache_buster, sink).await {
            warn!("layer {} failed to load: {err}", layer.id);
            failures.push((layer.id.clone(), err));
        }
    }
    failures
}
