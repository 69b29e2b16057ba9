use foundation::bounds::Aabb2;
use formats::{DecodeError, FeatureCollection};

use crate::feature::Feature;
use crate::style::Style;

/// Result of decoding one raw layer document: features ready to attach plus
/// the derived box for initial framing.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub features: Vec<Feature>,
    pub bounds: Option<Aabb2>,
}

/// Decode a raw GeoJSON document into features styled with the owning
/// layer's default.
///
/// Id assignment: the source `id` when present, else the decode index,
/// which is stable because document order is stable.
pub fn decode_document(raw: &str, default_style: &Style) -> Result<LoadResult, DecodeError> {
    let collection = FeatureCollection::from_geojson_str(raw)?;
    Ok(load_collection(collection, default_style))
}

pub fn load_collection(collection: FeatureCollection, default_style: &Style) -> LoadResult {
    let bounds = collection.bounds();
    let features = collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let bounds = raw.geometry.bounds();
            Feature {
                id: raw.id.unwrap_or_else(|| index.to_string()),
                geometry: raw.geometry,
                properties: raw.properties,
                bounds,
                current_style: default_style.clone(),
            }
        })
        .collect();
    LoadResult { features, bounds }
}
